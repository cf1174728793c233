//! Resource paths without a scheme or assembly path.

use std::str::FromStr ;

use itertools::Itertools ;

use crate::locator::{ Locator, LocatorError, PATH_SCHEME, SEPARATOR };



/// Assembly of the synthetic locator relative resources are parsed against.
const BASE_ASSEMBLY: &str = "base" ;

/// The resource half of a [`Locator`], used to address resources within one plugin unit.
///
/// Two relative resources are equal iff their segment sequences are equal, including
/// the empty leading segment produced by a leading `/`. A relative resource parsed from
/// some text is always equal to the resource half of a locator built from the same text:
///
/// ```
/// use texart_locator::{ Locator, RelativeResource };
///
/// let locator = Locator::parse( "tx:///plugins/foo.dll:Generators/Bright" ).unwrap();
/// let resource = RelativeResource::parse( "Generators/Bright" ).unwrap();
/// assert_eq!( locator.relative_resource(), &resource );
/// ```
#[derive( Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct RelativeResource {
    segments: Vec<String>,
}

impl RelativeResource {

    /// Parses `text` as a resource path.
    ///
    /// The text goes through the same URI rules as the resource half of a full locator.
    ///
    /// # Errors
    /// Returns [`LocatorError::InvalidRelativeResource`] if `text` contains the separator,
    /// a query, a fragment, or otherwise cannot appear as the resource half of a locator.
    pub fn parse( text: &str ) -> Result<Self, LocatorError> {

        let invalid = | reason: String | LocatorError::InvalidRelativeResource {
            input: text.to_string(),
            reason,
        };

        if text.contains( SEPARATOR ) {
            return Err( invalid( format!( "{:?} is reserved as the assembly separator", SEPARATOR )));
        }

        let locator = Locator::parse( &format!( "{}:///{}{}{}", PATH_SCHEME, BASE_ASSEMBLY, SEPARATOR, text ))
            .map_err(| err | invalid( err.to_string() ))?;

        match locator.assembly_segments() == [ BASE_ASSEMBLY ] {
            true => Ok( locator.relative_resource().clone() ),
            false => Err( invalid( "dot segments escape the resource path".to_string() )),
        }

    }

    /// Builds a relative resource from already split segments.
    ///
    /// No validation happens; segments are stored verbatim.
    pub fn from_segments( segments: impl IntoIterator<Item = impl Into<String>> ) -> Self {
        Self { segments: segments.into_iter().map( Into::into ).collect() }
    }

    /// The `/`-separated segments, still percent-escaped.
    #[inline] pub fn segments( &self ) -> &[String] { &self.segments }

    /// Returns `true` for the empty resource path.
    pub fn is_empty( &self ) -> bool {
        match self.segments.as_slice() {
            [] => true,
            [ only ] => only.is_empty(),
            _ => false,
        }
    }

}

impl std::fmt::Display for RelativeResource {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        write!( f, "{}", self.segments.iter().format( "/" ))
    }
}

impl FromStr for RelativeResource {
    type Err = LocatorError ;
    fn from_str( text: &str ) -> Result<Self, Self::Err> { Self::parse( text )}
}

impl TryFrom<&str> for RelativeResource {
    type Error = LocatorError ;
    fn try_from( text: &str ) -> Result<Self, Self::Error> { Self::parse( text )}
}

impl From<&Locator> for RelativeResource {
    fn from( locator: &Locator ) -> Self { locator.relative_resource().clone() }
}
