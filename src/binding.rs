//! Lookup results.
//!
//! Looking a resource up in a [`Catalog`]( crate::Catalog ) yields a
//! [`ResourceBinding`]: either a [`Factory`] that builds the capability, or an
//! instruction to look somewhere else. Redirects carry an [`ArgumentsTransform`]
//! so the redirecting resource can preset or rename options for its target.

use std::sync::Arc ;
use thiserror::Error ;

use crate::arguments::{ Arguments, ArgumentsTransform };
use crate::locator::Locator ;
use crate::relative_resource::RelativeResource ;



/// A shareable constructor for a capability of type `T`.
///
/// Cloning a factory shares the underlying closure. Two factories compare equal
/// only if they share it.
pub struct Factory<T>( Arc<dyn Fn( &Arguments ) -> T + Send + Sync> );

impl<T> Factory<T> {

    /// Wraps `factory` into a shareable factory.
    pub fn new( factory: impl Fn( &Arguments ) -> T + Send + Sync + 'static ) -> Self {
        Self( Arc::new( factory ))
    }

    /// Invokes the factory.
    pub fn call( &self, arguments: &Arguments ) -> T { ( self.0 )( arguments )}

    /// Returns a factory that passes this factory's output through `map`.
    pub fn map<U>( self, map: impl Fn( T ) -> U + Send + Sync + 'static ) -> Factory<U>
    where
        T: 'static,
        U: 'static,
    {
        Factory::new( move | arguments | map( self.call( arguments )))
    }

}

impl<T> Clone for Factory<T> {
    fn clone( &self ) -> Self { Self( Arc::clone( &self.0 ))}
}

impl<T> PartialEq for Factory<T> {
    fn eq( &self, other: &Self ) -> bool { Arc::ptr_eq( &self.0, &other.0 )}
}

impl<T> std::fmt::Debug for Factory<T> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result { f.write_str( "Factory(<closure>)" )}
}



/// Names the active variant of a [`ResourceBinding`].
#[derive( Copy, Clone, Debug, PartialEq, Eq, Hash )]
pub enum BindingKind {
    Factory,
    Redirect,
    RelativeRedirect,
}

impl std::fmt::Display for BindingKind {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

/// Reading a [`ResourceBinding`] through an accessor for a variant it does not hold.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum BindingError {
    #[error( "Cannot access {attempted} on a {actual} binding" )]
    InactiveVariantAccess { attempted: BindingKind, actual: BindingKind },
}



/// The value a plugin catalog answers a lookup with.
///
/// Consumers are expected to `match` exhaustively; the `as_*` accessors exist for
/// call sites that know which variant they hold and want a typed error otherwise.
///
/// # Type Parameters
/// - `T`: The capability the factory produces (e.g. a boxed generator)
pub enum ResourceBinding<T> {
    /// Build the capability here.
    Factory( Factory<T> ),
    /// Resolve `locator` instead, which may live in another plugin unit.
    Redirect { locator: Locator, transform: ArgumentsTransform },
    /// Resolve `resource` inside the same plugin unit instead.
    RelativeRedirect { resource: RelativeResource, transform: ArgumentsTransform },
}

impl<T> ResourceBinding<T> {

    /// A binding that builds the capability with `factory`.
    pub fn factory( factory: impl Fn( &Arguments ) -> T + Send + Sync + 'static ) -> Self {
        Self::Factory( Factory::new( factory ))
    }

    /// A redirect to `locator` passing arguments through unchanged.
    pub fn redirect( locator: Locator ) -> Self {
        Self::redirect_with( locator, ArgumentsTransform::identity() )
    }

    /// A redirect to `locator` rewriting arguments with `transform`.
    pub fn redirect_with( locator: Locator, transform: ArgumentsTransform ) -> Self {
        Self::Redirect { locator, transform }
    }

    /// A redirect to `resource` in the same plugin unit passing arguments through unchanged.
    pub fn relative_redirect( resource: RelativeResource ) -> Self {
        Self::relative_redirect_with( resource, ArgumentsTransform::identity() )
    }

    /// A redirect to `resource` in the same plugin unit rewriting arguments with `transform`.
    pub fn relative_redirect_with( resource: RelativeResource, transform: ArgumentsTransform ) -> Self {
        Self::RelativeRedirect { resource, transform }
    }

    /// The active variant.
    pub fn kind( &self ) -> BindingKind {
        match self {
            Self::Factory( _ ) => BindingKind::Factory,
            Self::Redirect { .. } => BindingKind::Redirect,
            Self::RelativeRedirect { .. } => BindingKind::RelativeRedirect,
        }
    }

    /// The factory of a [`Factory`]( Self::Factory ) binding.
    ///
    /// # Errors
    /// Returns [`BindingError::InactiveVariantAccess`] for redirects.
    pub fn as_factory( &self ) -> Result<&Factory<T>, BindingError> {
        match self {
            Self::Factory( factory ) => Ok( factory ),
            _ => Err( self.inactive( BindingKind::Factory )),
        }
    }

    /// The target and transform of a [`Redirect`]( Self::Redirect ) binding.
    ///
    /// # Errors
    /// Returns [`BindingError::InactiveVariantAccess`] for any other variant.
    pub fn as_redirect( &self ) -> Result<( &Locator, &ArgumentsTransform ), BindingError> {
        match self {
            Self::Redirect { locator, transform } => Ok(( locator, transform )),
            _ => Err( self.inactive( BindingKind::Redirect )),
        }
    }

    /// The target and transform of a [`RelativeRedirect`]( Self::RelativeRedirect ) binding.
    ///
    /// # Errors
    /// Returns [`BindingError::InactiveVariantAccess`] for any other variant.
    pub fn as_relative_redirect( &self ) -> Result<( &RelativeResource, &ArgumentsTransform ), BindingError> {
        match self {
            Self::RelativeRedirect { resource, transform } => Ok(( resource, transform )),
            _ => Err( self.inactive( BindingKind::RelativeRedirect )),
        }
    }

    /// Converts the produced capability, e.g. to widen a concrete generator into a
    /// boxed trait object. Redirects are carried over unchanged.
    pub fn map<U>( self, map: impl Fn( T ) -> U + Send + Sync + 'static ) -> ResourceBinding<U>
    where
        T: 'static,
        U: 'static,
    {
        match self {
            Self::Factory( factory ) => ResourceBinding::Factory( factory.map( map )),
            Self::Redirect { locator, transform } => ResourceBinding::Redirect { locator, transform },
            Self::RelativeRedirect { resource, transform } => ResourceBinding::RelativeRedirect { resource, transform },
        }
    }

    fn inactive( &self, attempted: BindingKind ) -> BindingError {
        BindingError::InactiveVariantAccess { attempted, actual: self.kind() }
    }

}

impl<T> Clone for ResourceBinding<T> {
    fn clone( &self ) -> Self {
        match self {
            Self::Factory( factory ) => Self::Factory( factory.clone() ),
            Self::Redirect { locator, transform } => Self::Redirect { locator: locator.clone(), transform: transform.clone() },
            Self::RelativeRedirect { resource, transform } => Self::RelativeRedirect { resource: resource.clone(), transform: transform.clone() },
        }
    }
}

impl<T> PartialEq for ResourceBinding<T> {
    fn eq( &self, other: &Self ) -> bool {
        match ( self, other ) {
            ( Self::Factory( left ), Self::Factory( right )) => left == right,
            (
                Self::Redirect { locator: left, transform: left_transform },
                Self::Redirect { locator: right, transform: right_transform },
            ) => left == right && left_transform == right_transform,
            (
                Self::RelativeRedirect { resource: left, transform: left_transform },
                Self::RelativeRedirect { resource: right, transform: right_transform },
            ) => left == right && left_transform == right_transform,
            _ => false,
        }
    }
}

impl<T> std::fmt::Debug for ResourceBinding<T> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        match self {
            Self::Factory( factory ) => f.debug_tuple( "Factory" ).field( factory ).finish(),
            Self::Redirect { locator, transform } => f.debug_struct( "Redirect" )
                .field( "locator", &locator.as_str() )
                .field( "transform", transform )
                .finish(),
            Self::RelativeRedirect { resource, transform } => f.debug_struct( "RelativeRedirect" )
                .field( "resource", &resource.to_string() )
                .field( "transform", transform )
                .finish(),
        }
    }
}

impl<T> From<Factory<T>> for ResourceBinding<T> {
    fn from( factory: Factory<T> ) -> Self { Self::Factory( factory )}
}

#[cfg( test )]
mod tests {

    use super::* ;

    #[test]
    fn accessing_inactive_variant_names_both_variants() {
        let binding = ResourceBinding::<u32>::relative_redirect( RelativeResource::parse( "h" ).unwrap() );
        match binding.as_factory() {
            Err( BindingError::InactiveVariantAccess { attempted: BindingKind::Factory, actual: BindingKind::RelativeRedirect }) => {}
            other => panic!( "Unexpected result: {:?}", other ),
        }
        assert!( binding.as_redirect().is_err() );
        assert!( binding.as_relative_redirect().is_ok() );
    }

    #[test]
    fn factories_compare_by_identity() {
        let factory = Factory::new(| _: &Arguments | 7_u32 );
        let same = ResourceBinding::Factory( factory.clone() );
        let other = ResourceBinding::factory(| _: &Arguments | 7_u32 );
        assert_eq!( ResourceBinding::Factory( factory ), same );
        assert_ne!( same, other );
    }

    #[test]
    fn redirects_compare_by_target() {
        let resource = RelativeResource::parse( "a/b" ).unwrap();
        assert_eq!(
            ResourceBinding::<u32>::relative_redirect( resource.clone() ),
            ResourceBinding::<u32>::relative_redirect( resource.clone() ),
        );
        assert_ne!(
            ResourceBinding::<u32>::relative_redirect( resource.clone() ),
            ResourceBinding::<u32>::relative_redirect_with( resource, ArgumentsTransform::new( Arguments::clone )),
        );
    }

    #[test]
    fn map_widens_factory_output() {
        let binding = ResourceBinding::factory(| arguments: &Arguments | arguments.len() as u32 )
            .map(| count | u64::from( count ) * 2 );
        let args = Arguments::new().with( "a", "1" );
        assert_eq!( binding.as_factory().unwrap().call( &args ), 2 );
    }

}
