//! Redirect resolution.
//!
//! A lookup may answer with a redirect rather than a factory. The [`Resolver`]
//! keeps following redirects, loading other plugin units through a
//! [`PluginLoader`] when a redirect leaves the current one, until a factory is
//! reached. Redirect chains are bounded: revisiting a state is reported as a
//! cycle, and chains longer than [`ResolverOptions::max_hops`] are cut off.

use std::collections::HashSet ;
use thiserror::Error ;

use crate::arguments::Arguments ;
use crate::binding::{ Factory, ResourceBinding };
use crate::catalog::{ CatalogError, ResourceKind };
use crate::locator::{ Locator, LocatorError };
use crate::plugin::{ Plugin, PluginLoader };



/// Errors that end a resolution.
///
/// # Type Parameters
/// - `E`: The [`PluginLoader`]'s error type
#[derive( Debug, Error )]
pub enum ResolveError<E: std::error::Error + 'static> {
    /// A plugin unit has no resource under the requested name.
    #[error( "Lookup failed: {0}" )] Lookup( #[from] CatalogError ),
    /// The loader could not provide the plugin unit a redirect points into.
    #[error( "Failed to load {assembly_path:?}: {source}" )]
    Load { assembly_path: String, source: E },
    /// A relative redirect could not be combined with the current locator.
    #[error( "Invalid redirect: {0}" )] InvalidRedirect( #[from] LocatorError ),
    /// The chain came back to a locator it already visited in the same plugin unit.
    #[error( "Redirect cycle detected at {locator}" )]
    CycleDetected { locator: Locator },
    /// The chain followed more redirects than allowed.
    #[error( "Redirect limit of {limit} exceeded at {locator}" )]
    HopLimitExceeded { limit: usize, locator: Locator },
}

/// Bounds applied while following redirects.
#[derive( Copy, Clone, Debug, PartialEq, Eq )]
pub struct ResolverOptions {
    max_hops: usize,
    detect_cycles: bool,
}

impl ResolverOptions {

    /// Default upper bound on followed redirects.
    pub const DEFAULT_MAX_HOPS: usize = 64 ;

    /// Sets the number of redirects a resolution may follow. `0` accepts direct factories only.
    pub fn with_max_hops( mut self, max_hops: usize ) -> Self {
        self.max_hops = max_hops ;
        self
    }

    /// Enables or disables early detection of revisited locators.
    ///
    /// With detection disabled a cycle still ends at the hop limit.
    pub fn with_cycle_detection( mut self, enabled: bool ) -> Self {
        self.detect_cycles = enabled ;
        self
    }

    #[inline] pub fn max_hops( &self ) -> usize { self.max_hops }
    #[inline] pub fn detects_cycles( &self ) -> bool { self.detect_cycles }

}

impl Default for ResolverOptions {
    fn default() -> Self { Self { max_hops: Self::DEFAULT_MAX_HOPS, detect_cycles: true }}
}

/// The end of a resolution: a factory and everything needed to invoke it.
#[derive( Debug )]
pub struct Resolved<T> {
    factory: Factory<T>,
    arguments: Arguments,
    locator: Locator,
    hops: usize,
}

impl<T> Resolved<T> {

    /// The factory found at the end of the chain.
    #[inline] pub fn factory( &self ) -> &Factory<T> { &self.factory }

    /// The caller's arguments after every redirect's transform was applied.
    #[inline] pub fn arguments( &self ) -> &Arguments { &self.arguments }

    /// The locator the factory was registered under.
    #[inline] pub fn locator( &self ) -> &Locator { &self.locator }

    /// Number of redirects followed.
    #[inline] pub fn hops( &self ) -> usize { self.hops }

    /// Splits into the factory, the final arguments and the final locator.
    pub fn into_parts( self ) -> ( Factory<T>, Arguments, Locator ) {( self.factory, self.arguments, self.locator )}

}

/// Which unit a locator was looked up in: the one the caller passed, or one the
/// loader produced for the locator's own assembly path.
#[derive( Copy, Clone, Debug, PartialEq, Eq, Hash )]
enum Origin { Caller, Loaded }

/// Follows [`ResourceBinding`]s across plugin units.
///
/// ```
/// use texart_locator::{ Arguments, CatalogBuilder, Locator, PluginLoader, Catalog, RelativeResource, ResourceBinding, Resolver };
///
/// # #[derive( Debug, thiserror::Error )]
/// # #[error( "not found" )]
/// # struct NotFound ;
/// # struct NoLoader ;
/// # impl PluginLoader for NoLoader {
/// # 	type Generator = u32 ;
/// # 	type Renderer = u32 ;
/// # 	type Plugin = Catalog<u32, u32> ;
/// # 	type Error = NotFound ;
/// # 	fn load( &self, _: &str ) -> Result<Self::Plugin, Self::Error> { Err( NotFound ) }
/// # }
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut builder = CatalogBuilder::<u32, u32>::new();
/// builder
/// 	.add_generator( RelativeResource::parse( "g" )?, ResourceBinding::relative_redirect( RelativeResource::parse( "h" )? ), None )?
/// 	.add_generator( RelativeResource::parse( "h" )?, ResourceBinding::factory(| _: &Arguments | 42 ), None )?;
/// let catalog = builder.build();
///
/// let resolver = Resolver::new( NoLoader );
/// let resolved = resolver.resolve_generator( &catalog, &Locator::parse( "tx:///plugin.dll:g" )?, Arguments::new() )?;
/// assert_eq!( resolved.factory().call( resolved.arguments() ), 42 );
/// assert_eq!( resolved.hops(), 1 );
/// # Ok(())
/// # }
/// ```
#[derive( Debug, Clone )]
pub struct Resolver<L> {
    loader: L,
    options: ResolverOptions,
}

impl<L> Resolver<L> {

    /// Creates a resolver with default [`ResolverOptions`].
    pub fn new( loader: L ) -> Self { Self { loader, options: ResolverOptions::default() }}

    /// Replaces the resolver's options.
    pub fn with_options( mut self, options: ResolverOptions ) -> Self {
        self.options = options ;
        self
    }

    #[inline] pub fn options( &self ) -> &ResolverOptions { &self.options }
    #[inline] pub fn loader( &self ) -> &L { &self.loader }

}

impl<L: PluginLoader> Resolver<L> {

    /// Resolves the generator addressed by `locator`, starting in `plugin`.
    ///
    /// `plugin` is the unit the host already holds for `locator`; the loader is only
    /// consulted when a redirect leaves it.
    ///
    /// # Errors
    /// See [`ResolveError`].
    pub fn resolve_generator(
        &self,
        plugin: &L::Plugin,
        locator: &Locator,
        arguments: Arguments,
    ) -> Result<Resolved<L::Generator>, ResolveError<L::Error>> {
        self.resolve( ResourceKind::Generator, plugin, locator, arguments, | unit, locator | unit.lookup_generator( locator ))
    }

    /// Resolves the renderer addressed by `locator`, starting in `plugin`.
    ///
    /// # Errors
    /// See [`ResolveError`].
    pub fn resolve_renderer(
        &self,
        plugin: &L::Plugin,
        locator: &Locator,
        arguments: Arguments,
    ) -> Result<Resolved<L::Renderer>, ResolveError<L::Error>> {
        self.resolve( ResourceKind::Renderer, plugin, locator, arguments, | unit, locator | unit.lookup_renderer( locator ))
    }

    fn resolve<T>(
        &self,
        kind: ResourceKind,
        plugin: &L::Plugin,
        locator: &Locator,
        mut arguments: Arguments,
        lookup: impl Fn( &L::Plugin, &Locator ) -> Result<ResourceBinding<T>, CatalogError>,
    ) -> Result<Resolved<T>, ResolveError<L::Error>> {

        let mut loaded: Option<L::Plugin> = None ;
        let mut locator = locator.clone();
        let mut origin = Origin::Caller ;
        let mut visited = HashSet::new();
        let mut hops = 0 ;

        loop {

            if self.options.detect_cycles && !visited.insert(( origin, locator.clone() )) {
                tracing::warn!( %kind, %locator, hops, "redirect cycle detected" );
                return Err( ResolveError::CycleDetected { locator });
            }

            let unit = loaded.as_ref().unwrap_or( plugin );
            let binding = lookup( unit, &locator )?;
            tracing::debug!( %kind, %locator, hops, binding = %binding.kind(), "resolving" );

            match binding {
                ResourceBinding::Factory( factory ) => return Ok( Resolved { factory, arguments, locator, hops }),
                ResourceBinding::RelativeRedirect { resource, transform } => {
                    let next = locator.with_relative_resource( &resource )?;
                    locator = self.check_budget( kind, hops, next )?;
                    arguments = transform.apply( arguments );
                },
                ResourceBinding::Redirect { locator: target, transform } => {
                    let target = self.check_budget( kind, hops, target )?;
                    let assembly_path = target.assembly_path_decoded();
                    let unit = self.loader.load( &assembly_path )
                        .map_err(| source | ResolveError::Load { assembly_path, source })?;
                    loaded = Some( unit );
                    origin = Origin::Loaded ;
                    locator = target ;
                    arguments = transform.apply( arguments );
                },
            }

            hops += 1 ;

        }

    }

    /// Passes `next` through if one more redirect fits within `max_hops`.
    fn check_budget( &self, kind: ResourceKind, hops: usize, next: Locator ) -> Result<Locator, ResolveError<L::Error>> {
        match hops < self.options.max_hops {
            true => Ok( next ),
            false => {
                tracing::warn!( %kind, locator = %next, limit = self.options.max_hops, "redirect limit exceeded" );
                Err( ResolveError::HopLimitExceeded { limit: self.options.max_hops, locator: next })
            },
        }
    }

}
