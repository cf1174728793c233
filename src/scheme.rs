//! Scheme tokens.
//!
//! A [`SchemeToken`] is the short identifier in front of `://` in a
//! [`Locator`]( crate::Locator ). Tokens are case-insensitive: the text is
//! lower-cased once at creation, so derived equality and hashing already
//! ignore case.

use std::str::FromStr ;

use crate::locator::LocatorError ;



/// A validated, lower-cased scheme identifier.
///
/// Valid tokens are non-empty, start with an ASCII letter and contain only ASCII
/// letters, digits and `-`. This is stricter than the general URI scheme grammar:
/// `+`, `.`, `_`, whitespace and control characters are all rejected.
///
/// ```
/// use texart_locator::SchemeToken ;
///
/// let upper = SchemeToken::new( "FILE" ).unwrap();
/// let lower = SchemeToken::new( "file" ).unwrap();
/// assert_eq!( upper, lower );
/// assert_eq!( upper.as_str(), "file" );
/// ```
#[derive( Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct SchemeToken( String );

impl SchemeToken {

    /// Validates `text` and stores its lower-cased form.
    ///
    /// # Errors
    /// Returns [`LocatorError::InvalidScheme`] if `text` does not match
    /// `[A-Za-z][A-Za-z0-9-]*`.
    pub fn new( text: impl AsRef<str> ) -> Result<Self, LocatorError> {
        let text = text.as_ref();
        match is_valid( text ) {
            true => Ok( Self( text.to_ascii_lowercase() )),
            false => Err( LocatorError::InvalidScheme( text.to_string() )),
        }
    }

    /// The normalized (lower-case) token text.
    #[inline] pub fn as_str( &self ) -> &str { &self.0 }

    /// Returns `true` if `path` starts with `"{scheme}://"`.
    ///
    /// The scheme part of `path` is compared case-insensitively.
    pub fn matches( &self, path: &str ) -> bool {
        path.len() >= self.0.len() + 3
            && path.is_char_boundary( self.0.len() )
            && path[..self.0.len()].eq_ignore_ascii_case( &self.0 )
            && path[self.0.len()..].starts_with( "://" )
    }

    /// Removes the `"{scheme}://"` prefix from `path`.
    ///
    /// Returns `None` when [`matches`]( Self::matches ) does not hold.
    pub fn strip_prefix<'a>( &self, path: &'a str ) -> Option<&'a str> {
        match self.matches( path ) {
            true => Some( &path[self.0.len() + 3..] ),
            false => None,
        }
    }

    /// Prepends `"{scheme}://"` to `path`.
    pub fn add_prefix( &self, path: &str ) -> String {
        format!( "{}://{}", self.0, path )
    }

}

fn is_valid( text: &str ) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some( first ) if first.is_ascii_alphabetic() => chars.all(| c | c.is_ascii_alphanumeric() || c == '-' ),
        _ => false,
    }
}

impl std::fmt::Display for SchemeToken {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { f.write_str( &self.0 )}
}

impl FromStr for SchemeToken {
    type Err = LocatorError ;
    fn from_str( text: &str ) -> Result<Self, Self::Err> { Self::new( text )}
}

impl AsRef<str> for SchemeToken {
    fn as_ref( &self ) -> &str { &self.0 }
}

#[cfg( test )]
mod tests {

    use super::* ;

    #[test]
    fn rejects_characters_outside_token_grammar() {
        for text in [ "", "1tx", "-tx", "t+x", "t.x", "t_x", "t x", "tx\n", "tëx" ] {
            assert!( SchemeToken::new( text ).is_err(), "accepted {:?}", text );
        }
    }

    #[test]
    fn accepts_letters_digits_and_hyphens() {
        for text in [ "t", "tx", "Tx-2", "a-b-c9" ] {
            assert!( SchemeToken::new( text ).is_ok(), "rejected {:?}", text );
        }
    }

    #[test]
    fn strip_prefix_ignores_scheme_case() {
        let scheme = SchemeToken::new( "tx" ).unwrap();
        assert_eq!( scheme.strip_prefix( "TX://a:b" ), Some( "a:b" ));
        assert_eq!( scheme.strip_prefix( "tx:/a:b" ), None );
        assert_eq!( scheme.strip_prefix( "txt://a" ), None );
        assert_eq!( scheme.strip_prefix( "t" ), None );
    }

}
