//! Plugin units and the collaborator that loads them.
//!
//! How a plugin unit comes into existence (a compiled library, a script, an
//! in-memory registry) is up to the host. This crate only needs two things: a
//! way to reach a unit's [`Catalog`], and a way to obtain another unit given the
//! assembly path of a [`Locator`]. Those are the [`Plugin`] and [`PluginLoader`]
//! traits.

use std::sync::Arc ;

use crate::binding::ResourceBinding ;
use crate::catalog::{ Catalog, CatalogError, Package };
use crate::locator::Locator ;



/// A loaded plugin unit exposing a [`Catalog`].
///
/// The provided methods answer lookups addressed by a full [`Locator`]; only its
/// resource half is consulted, the assembly half having already selected this unit.
///
/// # Type Parameters
/// - `G`: Generator capability type
/// - `R`: Renderer capability type
pub trait Plugin<G, R> {

    /// The unit's catalog.
    fn catalog( &self ) -> &Catalog<G, R> ;

    /// Looks up the generator addressed by `locator`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if the unit has no such generator.
    fn lookup_generator( &self, locator: &Locator ) -> Result<ResourceBinding<G>, CatalogError> {
        self.catalog().lookup_generator( locator.relative_resource() ).cloned()
    }

    /// Looks up the renderer addressed by `locator`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if the unit has no such renderer.
    fn lookup_renderer( &self, locator: &Locator ) -> Result<ResourceBinding<R>, CatalogError> {
        self.catalog().lookup_renderer( locator.relative_resource() ).cloned()
    }

    /// Looks up the package addressed by `locator`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if the unit has no such package.
    fn lookup_package( &self, locator: &Locator ) -> Result<Package, CatalogError> {
        self.catalog().lookup_package( locator.relative_resource() )
    }

}

impl<G, R> Plugin<G, R> for Catalog<G, R> {
    fn catalog( &self ) -> &Catalog<G, R> { self }
}

impl<G, R, P: Plugin<G, R> + ?Sized> Plugin<G, R> for Arc<P> {
    fn catalog( &self ) -> &Catalog<G, R> { P::catalog( self )}
}

impl<G, R, P: Plugin<G, R> + ?Sized> Plugin<G, R> for Box<P> {
    fn catalog( &self ) -> &Catalog<G, R> { P::catalog( self )}
}

/// Loads plugin units by assembly path.
///
/// Implement this trait to connect the resolver to however the host discovers
/// plugins. The resolver calls [`load`]( Self::load ) once per cross-plugin
/// redirect and never caches the result; implementations that want caching keep
/// it themselves.
///
/// # Example
///
/// ```
/// use std::collections::HashMap ;
/// use texart_locator::{ Catalog, PluginLoader };
///
/// #[derive( Debug, thiserror::Error )]
/// #[error( "Unknown assembly: {0}" )]
/// struct UnknownAssembly( String );
///
/// struct InMemory( HashMap<String, Catalog<String, String>> );
///
/// impl PluginLoader for InMemory {
/// 	type Generator = String ;
/// 	type Renderer = String ;
/// 	type Plugin = Catalog<String, String> ;
/// 	type Error = UnknownAssembly ;
/// 	fn load( &self, assembly_path: &str ) -> Result<Self::Plugin, Self::Error> {
/// 		self.0.get( assembly_path ).cloned().ok_or_else(|| UnknownAssembly( assembly_path.to_string() ))
/// 	}
/// }
/// ```
pub trait PluginLoader {

    /// Generator capability type of the loaded units.
    type Generator ;
    /// Renderer capability type of the loaded units.
    type Renderer ;
    /// The loaded unit.
    type Plugin: Plugin<Self::Generator, Self::Renderer> ;
    /// Error type for load failures.
    type Error: std::error::Error + 'static ;

    /// Loads the unit at `assembly_path`.
    ///
    /// `assembly_path` is percent-decoded, so `%3A` arrives as `:`.
    ///
    /// # Errors
    /// Implementations fail if the unit cannot be found or loaded.
    fn load( &self, assembly_path: &str ) -> Result<Self::Plugin, Self::Error> ;

}

impl<L: PluginLoader + ?Sized> PluginLoader for &L {
    type Generator = L::Generator ;
    type Renderer = L::Renderer ;
    type Plugin = L::Plugin ;
    type Error = L::Error ;
    fn load( &self, assembly_path: &str ) -> Result<Self::Plugin, Self::Error> { L::load( self, assembly_path )}
}
