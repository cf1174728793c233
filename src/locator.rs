//! Absolute resource locators.
//!
//! A [`Locator`] names a resource inside a plugin unit. It is a restricted
//! absolute URI whose path carries two logical paths at once:
//!
//! ```text
//! tx:///plugins/foo.dll:Generators/Bright
//! ^^    ^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^
//! |     assembly path   resource path
//! scheme
//! ```
//!
//! The assembly path identifies the plugin unit, the resource path identifies a
//! capability inside it. The two are separated by the *last* `:` of the right-most
//! path segment that contains one, so colons are free to appear anywhere inside
//! the assembly path. A literal colon elsewhere can be written as `%3A`.

use std::borrow::Cow ;
use std::str::FromStr ;

use itertools::Itertools ;
use percent_encoding::percent_decode_str ;
use pipe_trait::Pipe ;
use thiserror::Error ;
use url::{ Position, Url };

use crate::relative_resource::RelativeResource ;
use crate::scheme::SchemeToken ;



/// The reserved character splitting the assembly path from the resource path.
pub const SEPARATOR: char = ':' ;

/// Scheme every path is parsed under. It has no special URI rules, so paths read the
/// same under `tx:`, `file:` or `http:`.
pub(crate) const PATH_SCHEME: &str = "texart" ;

/// Errors produced while parsing or rebuilding locators and relative resources.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum LocatorError {
    /// The scheme does not match `[A-Za-z][A-Za-z0-9-]*`.
    #[error( "Invalid scheme: {0:?}" )] InvalidScheme( String ),
    /// The text is not an absolute URI of the shape `scheme://path`, or it carries an
    /// authority, query or fragment.
    #[error( "Malformed locator {input:?}: {reason}" )]
    MalformedLocator { input: String, reason: String },
    /// No path segment contains the assembly/resource separator.
    #[error( "Missing assembly/resource separator in {0:?}" )] MissingSeparator( String ),
    /// The text cannot be used as the resource half of a locator.
    #[error( "Invalid relative resource {input:?}: {reason}" )]
    InvalidRelativeResource { input: String, reason: String },
    /// The text cannot be used as the assembly half of a locator.
    #[error( "Invalid assembly path {input:?}: {reason}" )]
    InvalidAssemblyPath { input: String, reason: String },
}

impl LocatorError {
    fn malformed( input: &str, reason: impl Into<String> ) -> Self {
        Self::MalformedLocator { input: input.to_string(), reason: reason.into() }
    }
}



/// An absolute address of a plugin resource: scheme, assembly path and resource path.
///
/// Locators are immutable. The `with_*` methods return a new locator and leave the
/// untouched half byte-for-byte identical. Equality and hashing use the canonical
/// URI text, so two locators that normalize to the same URI compare equal.
///
/// ```
/// use texart_locator::Locator ;
///
/// let locator = Locator::parse( "tx:///path:to/plugin:foo.dll:resource/path" ).unwrap();
/// assert_eq!( locator.scheme().as_str(), "tx" );
/// assert_eq!( locator.assembly_path(), "path:to/plugin:foo.dll" );
/// assert_eq!( locator.resource_path(), "resource/path" );
/// ```
#[derive( Clone, Debug )]
pub struct Locator {
    uri: String,
    scheme: SchemeToken,
    assembly_segments: Vec<String>,
    resource: RelativeResource,
}

impl Locator {

    /// Parses `text` as a locator.
    ///
    /// The path follows the same URI rules whatever the scheme is: `file:` and other
    /// schemes with special URI handling get no drive letter or backslash rewriting.
    ///
    /// # Errors
    /// - [`LocatorError::MalformedLocator`] if `text` is not an absolute `scheme://path`
    /// 	URI or if it has an authority, query or fragment
    /// - [`LocatorError::InvalidScheme`] if the scheme fails the [`SchemeToken`] grammar
    /// - [`LocatorError::MissingSeparator`] if no segment contains [`SEPARATOR`]
    pub fn parse( text: &str ) -> Result<Self, LocatorError> {

        let ( scheme, rest ) = text.split_once( "://" )
            .ok_or_else(|| LocatorError::malformed( text, "expected `scheme://path`" ))?;
        let scheme = SchemeToken::new( scheme )?;

        if !rest.starts_with( '/' ) {
            return Err( LocatorError::malformed( text, "authority is not allowed" ));
        }

        let url = Url::parse( &format!( "{}://{}", PATH_SCHEME, rest ))
            .map_err(| err | LocatorError::malformed( text, err.to_string() ))?;

        if url.host_str().is_some_and(| host | !host.is_empty() ) {
            return Err( LocatorError::malformed( text, "authority is not allowed" ));
        }
        if url.query().is_some() { return Err( LocatorError::malformed( text, "query is not allowed" )); }
        if url.fragment().is_some() { return Err( LocatorError::malformed( text, "fragment is not allowed" )); }

        let ( assembly_segments, resource_segments ) = url.path()
            .pipe( split_segments )
            .pipe( partition )
            .ok_or_else(|| LocatorError::MissingSeparator( text.to_string() ))?;

        Ok( Self {
            uri: format!( "{}{}", scheme, &url[Position::AfterScheme..] ),
            scheme,
            assembly_segments,
            resource: RelativeResource::from_segments( resource_segments ),
        })

    }

    /// The locator's scheme.
    #[inline] pub fn scheme( &self ) -> &SchemeToken { &self.scheme }

    /// Path segments identifying the plugin unit, still percent-escaped.
    #[inline] pub fn assembly_segments( &self ) -> &[String] { &self.assembly_segments }

    /// Path segments identifying the resource inside the plugin unit, still percent-escaped.
    #[inline] pub fn resource_segments( &self ) -> &[String] { self.resource.segments() }

    /// The resource half of this locator.
    #[inline] pub fn relative_resource( &self ) -> &RelativeResource { &self.resource }

    /// The canonical URI text.
    #[inline] pub fn as_str( &self ) -> &str { &self.uri }

    /// Assembly segments joined with `/`.
    pub fn assembly_path( &self ) -> String { self.assembly_segments.iter().join( "/" )}

    /// Resource segments joined with `/`.
    pub fn resource_path( &self ) -> String { self.resource.to_string() }

    /// The assembly path with percent-escapes decoded, as a plugin loader would see it.
    pub fn assembly_path_decoded( &self ) -> String {
        decode( &self.assembly_path() ).into_owned()
    }

    /// The resource path with percent-escapes decoded.
    pub fn resource_path_decoded( &self ) -> String {
        decode( &self.resource_path() ).into_owned()
    }

    /// Returns a locator with the same paths under a different scheme.
    pub fn with_scheme( &self, scheme: &SchemeToken ) -> Self {
        Self {
            uri: format!( "{}{}", scheme, &self.uri[self.scheme.as_str().len()..] ),
            scheme: scheme.clone(),
            assembly_segments: self.assembly_segments.clone(),
            resource: self.resource.clone(),
        }
    }

    /// Returns a locator pointing into a different plugin unit, keeping the resource half.
    ///
    /// # Errors
    /// Returns [`LocatorError::InvalidAssemblyPath`] if `assembly_path` contains a query
    /// or fragment delimiter, or if it does not form a valid locator together with the
    /// existing resource half.
    pub fn with_assembly_path( &self, assembly_path: &str ) -> Result<Self, LocatorError> {

        let invalid = | reason: String | LocatorError::InvalidAssemblyPath {
            input: assembly_path.to_string(),
            reason,
        };

        if let Some( delimiter ) = assembly_path.chars().find(| c | matches!( c, '?' | '#' )) {
            return Err( invalid( format!( "{:?} is not allowed", delimiter )));
        }

        let rebuilt = Self::assemble( &self.scheme, assembly_path, &self.resource )
            .map_err(| err | invalid( err.to_string() ))?;

        match rebuilt.resource == self.resource {
            true => Ok( rebuilt ),
            false => Err( invalid( "the resource path would change".to_string() )),
        }

    }

    /// Returns a locator in the same plugin unit pointing at `resource`.
    ///
    /// # Errors
    /// Returns [`LocatorError::InvalidRelativeResource`] if the combination does not keep
    /// the assembly half intact.
    pub fn with_relative_resource( &self, resource: &RelativeResource ) -> Result<Self, LocatorError> {

        let assembly_path = self.assembly_path();
        let rebuilt = Self::assemble( &self.scheme, &assembly_path, resource )
            .map_err(| err | LocatorError::InvalidRelativeResource {
                input: resource.to_string(),
                reason: err.to_string(),
            })?;

        match rebuilt.assembly_segments == self.assembly_segments && rebuilt.resource == *resource {
            true => Ok( rebuilt ),
            false => Err( LocatorError::InvalidRelativeResource {
                input: resource.to_string(),
                reason: "the assembly path would change".to_string(),
            }),
        }

    }

    /// Parses `resource_path` as a [`RelativeResource`] and replaces the resource half.
    ///
    /// An empty string is allowed and denotes an empty resource path.
    ///
    /// # Errors
    /// Returns [`LocatorError::InvalidRelativeResource`] if `resource_path` is not a valid
    /// relative resource.
    pub fn with_resource_path( &self, resource_path: &str ) -> Result<Self, LocatorError> {
        self.with_relative_resource( &RelativeResource::parse( resource_path )? )
    }

    fn assemble( scheme: &SchemeToken, assembly_path: &str, resource: &RelativeResource ) -> Result<Self, LocatorError> {
        let text = scheme.add_prefix( &format!( "/{}{}{}", assembly_path, SEPARATOR, resource ));
        Self::parse( &text )
    }

}

fn decode( text: &str ) -> Cow<'_, str> {
    percent_decode_str( text ).decode_utf8_lossy()
}

/// Splits an absolute path on `/`, dropping the empty segment in front of the leading `/`.
pub(crate) fn split_segments( path: &str ) -> Vec<String> {
    let path = path.strip_prefix( '/' ).unwrap_or( path );
    path.split( '/' ).map( str::to_string ).collect()
}

/// Splits `segments` into assembly and resource halves.
///
/// Scans right to left. The first segment found to contain [`SEPARATOR`] is split at
/// its last occurrence; every segment left of it belongs to the assembly, every
/// segment right of it to the resource. Returns `None` if no segment has a separator.
pub(crate) fn partition( segments: Vec<String> ) -> Option<( Vec<String>, Vec<String> )> {

    let split_at = segments.iter().rposition(| segment | segment.contains( SEPARATOR ))?;

    let mut assembly = segments ;
    let mut resource = assembly.split_off( split_at + 1 );
    let pivot = assembly.pop()?;
    let ( left, right ) = pivot.rsplit_once( SEPARATOR )?;

    resource.insert( 0, right.to_string() );
    assembly.push( left.to_string() );

    Some(( assembly, resource ))

}

impl PartialEq for Locator {
    fn eq( &self, other: &Self ) -> bool { self.uri == other.uri }
}
impl Eq for Locator {}

impl std::hash::Hash for Locator {
    fn hash<H: std::hash::Hasher>( &self, state: &mut H ) { self.uri.hash( state ) }
}

impl std::fmt::Display for Locator {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { f.write_str( &self.uri )}
}

impl FromStr for Locator {
    type Err = LocatorError ;
    fn from_str( text: &str ) -> Result<Self, Self::Err> { Self::parse( text )}
}

impl TryFrom<&str> for Locator {
    type Error = LocatorError ;
    fn try_from( text: &str ) -> Result<Self, Self::Error> { Self::parse( text )}
}

#[cfg( test )]
mod tests {

    use super::* ;

    fn segments( items: &[&str] ) -> Vec<String> { items.iter().map(| s | s.to_string() ).collect() }

    #[test]
    fn partition_splits_last_colon_of_rightmost_segment() {
        let ( assembly, resource ) = partition( segments( &[ "path:to", "plugin:foo.dll:resource", "path" ])).unwrap();
        assert_eq!( assembly, segments( &[ "path:to", "plugin:foo.dll" ]));
        assert_eq!( resource, segments( &[ "resource", "path" ]));
    }

    #[test]
    fn partition_of_lone_separator_yields_empty_halves() {
        let ( assembly, resource ) = partition( segments( &[ ":" ])).unwrap();
        assert_eq!( assembly, segments( &[ "" ]));
        assert_eq!( resource, segments( &[ "" ]));
    }

    #[test]
    fn partition_without_separator_fails() {
        assert!( partition( segments( &[ "a", "b" ])).is_none() );
    }

    #[test]
    fn split_keeps_inner_empty_segments() {
        assert_eq!( split_segments( "/a//b/" ), segments( &[ "a", "", "b", "" ]));
        assert_eq!( split_segments( "//x:y" ), segments( &[ "", "x:y" ]));
    }

}
