//! The argument bag handed to factories, and transforms applied to it along redirects.

use std::collections::BTreeMap ;
use std::sync::Arc ;



/// A `String -> String` bag of options passed to a [`Factory`]( crate::Factory ).
///
/// The layer never interprets the contents; it only passes the bag along and lets
/// redirects rewrite it through an [`ArgumentsTransform`].
#[derive( Clone, Debug, Default, PartialEq, Eq )]
pub struct Arguments( BTreeMap<String, String> );

impl Arguments {

    /// Creates an empty bag.
    pub fn new() -> Self { Self::default() }

    /// Returns the value stored under `key`.
    pub fn get( &self, key: &str ) -> Option<&str> { self.0.get( key ).map( String::as_str )}

    /// Returns `true` if `key` is present.
    pub fn contains_key( &self, key: &str ) -> bool { self.0.contains_key( key )}

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert( &mut self, key: impl Into<String>, value: impl Into<String> ) -> Option<String> {
        self.0.insert( key.into(), value.into() )
    }

    /// Removes `key`, returning its value.
    pub fn remove( &mut self, key: &str ) -> Option<String> { self.0.remove( key )}

    /// Consuming variant of [`insert`]( Self::insert ).
    pub fn with( mut self, key: impl Into<String>, value: impl Into<String> ) -> Self {
        self.insert( key, value );
        self
    }

    /// Number of entries.
    #[inline] pub fn len( &self ) -> usize { self.0.len() }
    /// Returns `true` if the bag holds no entries.
    #[inline] pub fn is_empty( &self ) -> bool { self.0.is_empty() }

    /// Iterates entries in key order.
    pub fn iter( &self ) -> impl Iterator<Item = ( &str, &str )> {
        self.0.iter().map(|( key, value )| ( key.as_str(), value.as_str() ))
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<( K, V )> for Arguments {
    fn from_iter<T: IntoIterator<Item = ( K, V )>>( iter: T ) -> Self {
        Self( iter.into_iter().map(|( key, value )| ( key.into(), value.into() )).collect() )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<( K, V )> for Arguments {
    fn extend<T: IntoIterator<Item = ( K, V )>>( &mut self, iter: T ) {
        self.0.extend( iter.into_iter().map(|( key, value )| ( key.into(), value.into() )));
    }
}

impl IntoIterator for Arguments {
    type Item = ( String, String );
    type IntoIter = std::collections::btree_map::IntoIter<String, String> ;
    fn into_iter( self ) -> Self::IntoIter { self.0.into_iter() }
}



/// A pure rewrite of an [`Arguments`] bag, attached to redirects.
///
/// Transforms are shared closures: cloning one is cheap, and two transforms compare
/// equal only if both are the identity or both share the same closure.
#[derive( Clone, Default )]
pub struct ArgumentsTransform( Inner );

#[derive( Clone, Default )]
enum Inner {
    #[default] Identity,
    Map( Arc<dyn Fn( &Arguments ) -> Arguments + Send + Sync> ),
}

impl ArgumentsTransform {

    /// The transform that returns its input unchanged.
    pub fn identity() -> Self { Self( Inner::Identity )}

    /// Wraps `transform` into a shareable transform.
    pub fn new( transform: impl Fn( &Arguments ) -> Arguments + Send + Sync + 'static ) -> Self {
        Self( Inner::Map( Arc::new( transform )))
    }

    /// Returns `true` for the identity transform.
    pub fn is_identity( &self ) -> bool { matches!( self.0, Inner::Identity )}

    /// Applies the transform.
    pub fn apply( &self, arguments: Arguments ) -> Arguments {
        match &self.0 {
            Inner::Identity => arguments,
            Inner::Map( transform ) => transform( &arguments ),
        }
    }

    /// Composes `self` followed by `next`.
    pub fn then( self, next: Self ) -> Self {
        match ( self.0, next.0 ) {
            ( Inner::Identity, other ) | ( other, Inner::Identity ) => Self( other ),
            ( Inner::Map( first ), Inner::Map( second )) => Self::new( move | arguments | second( &first( arguments ))),
        }
    }

}

impl PartialEq for ArgumentsTransform {
    fn eq( &self, other: &Self ) -> bool {
        match ( &self.0, &other.0 ) {
            ( Inner::Identity, Inner::Identity ) => true,
            ( Inner::Map( left ), Inner::Map( right )) => Arc::ptr_eq( left, right ),
            _ => false,
        }
    }
}

impl std::fmt::Debug for ArgumentsTransform {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        match self.0 {
            Inner::Identity => f.write_str( "ArgumentsTransform(<identity>)" ),
            Inner::Map( _ ) => f.write_str( "ArgumentsTransform(<closure>)" ),
        }
    }
}

#[cfg( test )]
mod tests {

    use super::* ;

    fn preset( key: &'static str, value: &'static str ) -> ArgumentsTransform {
        ArgumentsTransform::new( move | arguments | arguments.clone().with( key, value ))
    }

    #[test]
    fn identity_passes_arguments_through() {
        let arguments = Arguments::from_iter([( "w", "80" ), ( "h", "24" )]);
        assert_eq!( ArgumentsTransform::identity().apply( arguments.clone() ), arguments );
        assert_eq!( ArgumentsTransform::default(), ArgumentsTransform::identity() );
    }

    #[test]
    fn composition_runs_left_to_right() {
        let transform = preset( "mode", "first" ).then( preset( "mode", "second" ));
        assert_eq!( transform.apply( Arguments::new() ).get( "mode" ), Some( "second" ));
    }

    #[test]
    fn composing_with_identity_keeps_the_closure() {
        let transform = preset( "a", "1" );
        assert_eq!( ArgumentsTransform::identity().then( transform.clone() ), transform );
        assert_eq!( transform.clone().then( ArgumentsTransform::identity() ), transform );
        assert_ne!( transform, preset( "a", "1" ));
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut arguments = Arguments::new().with( "b", "2" );
        arguments.extend([( "a", "1" )]);
        assert_eq!( arguments.iter().collect::<Vec<_>>(), vec![( "a", "1" ), ( "b", "2" )]);
        assert_eq!( arguments.remove( "a" ).as_deref(), Some( "1" ));
        assert_eq!( arguments.len(), 1 );
    }

}
