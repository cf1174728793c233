//! Plugin catalogs.
//!
//! A plugin unit publishes what it offers through a [`Catalog`]: named generators,
//! named renderers, and packages pairing a generator with a renderer of the same
//! name. Catalogs are assembled with a [`CatalogBuilder`] and frozen with
//! [`CatalogBuilder::snapshot`]; the result is immutable and cheap to clone.
//!
//! ```
//! use texart_locator::{ Arguments, CatalogBuilder, RelativeResource, ResourceBinding };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bright = RelativeResource::parse( "Bright" )?;
//!
//! let mut builder = CatalogBuilder::<String, String>::new();
//! builder
//! 	.add_generator( bright.clone(), ResourceBinding::factory(| _: &Arguments | "generator".to_string() ), None )?
//! 	.add_renderer( bright.clone(), ResourceBinding::factory(| _: &Arguments | "renderer".to_string() ), None )?
//! 	.add_package( bright.clone(), Some( "Bright generator with its renderer" ))?;
//!
//! let catalog = builder.snapshot();
//! assert_eq!( catalog.available_packages().count(), 1 );
//! assert!( catalog.lookup_generator( &bright ).is_ok() );
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap ;
use std::fmt::Write ;
use std::sync::Arc ;

use itertools::Itertools ;
use thiserror::Error ;

use crate::binding::ResourceBinding ;
use crate::locator::Locator ;
use crate::relative_resource::RelativeResource ;



/// The kinds of resources a catalog registers.
#[derive( Copy, Clone, Debug, PartialEq, Eq, Hash )]
pub enum ResourceKind {
    Generator,
    Renderer,
    Package,
}

impl std::fmt::Display for ResourceKind {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
        match self {
            Self::Generator => f.write_str( "generator" ),
            Self::Renderer => f.write_str( "renderer" ),
            Self::Package => f.write_str( "package" ),
        }
    }
}

/// Errors raised while building or querying a catalog.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum CatalogError {
    /// A resource of this kind is already registered under the name.
    #[error( "Duplicate {kind} name: {resource}" )]
    DuplicateResourceName { kind: ResourceKind, resource: RelativeResource },
    /// A package was added before the generator or renderer it refers to.
    #[error( "Package {resource} requires a {missing} with the same name" )]
    UnknownPackageComponent { resource: RelativeResource, missing: ResourceKind },
    /// No resource of this kind is registered under the name.
    #[error( "No such {kind}: {resource}" )]
    ResourceNotFound { kind: ResourceKind, resource: RelativeResource },
}

/// Errors raised while printing help text.
#[derive( Debug, Error )]
pub enum HelpError {
    #[error( "Catalog error: {0}" )] Catalog( #[from] CatalogError ),
    #[error( "Format error: {0}" )] Format( #[from] std::fmt::Error ),
}

/// A generator and a renderer meant to be used together.
#[derive( Clone, Debug, PartialEq, Eq, Hash )]
pub struct Package {
    pub generator: RelativeResource,
    pub renderer: RelativeResource,
}

struct Entry<T> {
    binding: ResourceBinding<T>,
    help: Option<String>,
}

impl<T> Clone for Entry<T> {
    fn clone( &self ) -> Self { Self { binding: self.binding.clone(), help: self.help.clone() }}
}

struct CatalogData<G, R> {
    generators: HashMap<RelativeResource, Entry<G>>,
    renderers: HashMap<RelativeResource, Entry<R>>,
    packages: HashMap<RelativeResource, Option<String>>,
    help: Option<String>,
}

impl<G, R> Default for CatalogData<G, R> {
    fn default() -> Self {
        Self {
            generators: HashMap::new(),
            renderers: HashMap::new(),
            packages: HashMap::new(),
            help: None,
        }
    }
}

impl<G, R> Clone for CatalogData<G, R> {
    fn clone( &self ) -> Self {
        Self {
            generators: self.generators.clone(),
            renderers: self.renderers.clone(),
            packages: self.packages.clone(),
            help: self.help.clone(),
        }
    }
}



/// Accumulates the resources of a plugin unit.
///
/// Registration is append-only: re-registering a name fails instead of overwriting,
/// and a failed call leaves the builder untouched. The builder is a single-writer
/// value; share it across threads only behind a lock.
///
/// # Type Parameters
/// - `G`: The generator capability produced by generator factories
/// - `R`: The renderer capability produced by renderer factories
pub struct CatalogBuilder<G, R> {
    data: CatalogData<G, R>,
}

impl<G, R> CatalogBuilder<G, R> {

    /// Creates an empty builder.
    pub fn new() -> Self { Self { data: CatalogData::default() }}

    /// Registers a generator under `resource`.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateResourceName`] if a generator is already
    /// registered under `resource`.
    pub fn add_generator(
        &mut self,
        resource: RelativeResource,
        binding: ResourceBinding<G>,
        help: Option<&str>,
    ) -> Result<&mut Self, CatalogError> {
        insert_unique( &mut self.data.generators, ResourceKind::Generator, resource, binding, help )?;
        Ok( self )
    }

    /// Registers a renderer under `resource`.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateResourceName`] if a renderer is already
    /// registered under `resource`.
    pub fn add_renderer(
        &mut self,
        resource: RelativeResource,
        binding: ResourceBinding<R>,
        help: Option<&str>,
    ) -> Result<&mut Self, CatalogError> {
        insert_unique( &mut self.data.renderers, ResourceKind::Renderer, resource, binding, help )?;
        Ok( self )
    }

    /// Registers a package pairing the generator and renderer named `resource`.
    ///
    /// # Errors
    /// - [`CatalogError::UnknownPackageComponent`] if no generator or no renderer is
    /// 	registered under `resource` yet
    /// - [`CatalogError::DuplicateResourceName`] if the package is already registered
    pub fn add_package( &mut self, resource: RelativeResource, help: Option<&str> ) -> Result<&mut Self, CatalogError> {

        let missing = [
            ( ResourceKind::Generator, self.data.generators.contains_key( &resource )),
            ( ResourceKind::Renderer, self.data.renderers.contains_key( &resource )),
        ].into_iter().find_map(|( kind, present )| ( !present ).then_some( kind ));

        if let Some( missing ) = missing {
            return Err( CatalogError::UnknownPackageComponent { resource, missing });
        }
        if self.data.packages.contains_key( &resource ) {
            return Err( CatalogError::DuplicateResourceName { kind: ResourceKind::Package, resource });
        }

        self.data.packages.insert( resource, help.map( str::to_string ));
        Ok( self )

    }

    /// Sets the help text of the whole catalog, replacing any previous text.
    pub fn set_help( &mut self, help: impl Into<String> ) -> &mut Self {
        self.data.help = Some( help.into() );
        self
    }

    /// Freezes the current state into a [`Catalog`].
    ///
    /// The snapshot owns a copy of the registrations, so later builder calls are not
    /// visible through it.
    pub fn snapshot( &self ) -> Catalog<G, R> {
        tracing::trace!(
            generators = self.data.generators.len(),
            renderers = self.data.renderers.len(),
            packages = self.data.packages.len(),
            "catalog snapshot"
        );
        Catalog { data: Arc::new( self.data.clone() )}
    }

    /// Consuming variant of [`snapshot`]( Self::snapshot ).
    pub fn build( self ) -> Catalog<G, R> {
        Catalog { data: Arc::new( self.data )}
    }

}

fn insert_unique<T>(
    map: &mut HashMap<RelativeResource, Entry<T>>,
    kind: ResourceKind,
    resource: RelativeResource,
    binding: ResourceBinding<T>,
    help: Option<&str>,
) -> Result<(), CatalogError> {
    match map.contains_key( &resource ) {
        true => Err( CatalogError::DuplicateResourceName { kind, resource }),
        false => {
            map.insert( resource, Entry { binding, help: help.map( str::to_string )});
            Ok(())
        }
    }
}

impl<G, R> Default for CatalogBuilder<G, R> {
    fn default() -> Self { Self::new() }
}

impl<G, R> Clone for CatalogBuilder<G, R> {
    fn clone( &self ) -> Self { Self { data: self.data.clone() }}
}

impl<G, R> std::fmt::Debug for CatalogBuilder<G, R> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "CatalogBuilder" )
            .field( "generators", &self.data.generators.len() )
            .field( "renderers", &self.data.renderers.len() )
            .field( "packages", &self.data.packages.len() )
            .finish_non_exhaustive()
    }
}



/// An immutable registry of the resources one plugin unit exposes.
///
/// Cloning a catalog shares the frozen registrations. Lookups need no
/// synchronization and can run concurrently.
pub struct Catalog<G, R> {
    data: Arc<CatalogData<G, R>>,
}

impl<G, R> Catalog<G, R> {

    /// Names of all registered generators, in no particular order.
    pub fn available_generators( &self ) -> impl Iterator<Item = &RelativeResource> { self.data.generators.keys() }

    /// Names of all registered renderers, in no particular order.
    pub fn available_renderers( &self ) -> impl Iterator<Item = &RelativeResource> { self.data.renderers.keys() }

    /// Names of all registered packages, in no particular order.
    pub fn available_packages( &self ) -> impl Iterator<Item = &RelativeResource> { self.data.packages.keys() }

    /// The binding registered for the generator `resource`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if no such generator exists.
    pub fn lookup_generator( &self, resource: &RelativeResource ) -> Result<&ResourceBinding<G>, CatalogError> {
        lookup( &self.data.generators, ResourceKind::Generator, resource ).map(| entry | &entry.binding )
    }

    /// The binding registered for the renderer `resource`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if no such renderer exists.
    pub fn lookup_renderer( &self, resource: &RelativeResource ) -> Result<&ResourceBinding<R>, CatalogError> {
        lookup( &self.data.renderers, ResourceKind::Renderer, resource ).map(| entry | &entry.binding )
    }

    /// The generator and renderer of the package `resource`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if no such package exists.
    pub fn lookup_package( &self, resource: &RelativeResource ) -> Result<Package, CatalogError> {
        match self.data.packages.contains_key( resource ) {
            true => Ok( Package { generator: resource.clone(), renderer: resource.clone() }),
            false => Err( not_found( ResourceKind::Package, resource )),
        }
    }

    /// Help text for the whole catalog.
    pub fn help( &self ) -> Option<&str> { self.data.help.as_deref() }

    /// Help text registered with a resource. `Ok( None )` means the resource exists
    /// but was registered without help.
    ///
    /// # Errors
    /// Returns [`CatalogError::ResourceNotFound`] if `resource` is not registered as `kind`.
    pub fn help_for( &self, kind: ResourceKind, resource: &RelativeResource ) -> Result<Option<&str>, CatalogError> {
        let help = match kind {
            ResourceKind::Generator => &lookup( &self.data.generators, kind, resource )?.help,
            ResourceKind::Renderer => &lookup( &self.data.renderers, kind, resource )?.help,
            ResourceKind::Package => self.data.packages.get( resource ).ok_or_else(|| not_found( kind, resource ))?,
        };
        Ok( help.as_deref() )
    }

    /// Writes the catalog help followed by every resource and its help, sorted by name.
    ///
    /// # Errors
    /// Fails only if writing to `out` fails.
    pub fn print_help( &self, out: &mut impl Write ) -> std::fmt::Result {

        if let Some( help ) = self.help() { writeln!( out, "{}", help )?; }

        let sections = [
            ( "Generators", self.data.generators.iter().map(|( name, entry )| ( name, entry.help.as_deref() )).collect::<Vec<_>>() ),
            ( "Renderers", self.data.renderers.iter().map(|( name, entry )| ( name, entry.help.as_deref() )).collect() ),
            ( "Packages", self.data.packages.iter().map(|( name, help )| ( name, help.as_deref() )).collect() ),
        ];

        for ( title, entries ) in sections {
            if entries.is_empty() { continue }
            writeln!( out, "{}:", title )?;
            for ( name, help ) in entries.into_iter().sorted_by(|( left, _ ), ( right, _ )| left.cmp( right )) {
                match help {
                    Some( help ) => writeln!( out, "  {} - {}", name, help )?,
                    None => writeln!( out, "  {}", name )?,
                }
            }
        }

        Ok(())

    }

    /// Writes the help text of the `kind` resource addressed by `locator`.
    ///
    /// # Errors
    /// Returns [`HelpError::Catalog`] if the resource is not registered, and
    /// [`HelpError::Format`] if writing to `out` fails.
    pub fn print_resource_help( &self, out: &mut impl Write, kind: ResourceKind, locator: &Locator ) -> Result<(), HelpError> {
        match self.help_for( kind, locator.relative_resource() )? {
            Some( help ) => writeln!( out, "{}", help )?,
            None => writeln!( out, "No help available for {} {}", kind, locator.relative_resource() )?,
        }
        Ok(())
    }

}

fn lookup<'a, T>(
    map: &'a HashMap<RelativeResource, Entry<T>>,
    kind: ResourceKind,
    resource: &RelativeResource,
) -> Result<&'a Entry<T>, CatalogError> {
    tracing::trace!( %kind, %resource, "catalog lookup" );
    map.get( resource ).ok_or_else(|| not_found( kind, resource ))
}

fn not_found( kind: ResourceKind, resource: &RelativeResource ) -> CatalogError {
    CatalogError::ResourceNotFound { kind, resource: resource.clone() }
}

impl<G, R> Clone for Catalog<G, R> {
    fn clone( &self ) -> Self { Self { data: Arc::clone( &self.data )}}
}

impl<G, R> Default for Catalog<G, R> {
    fn default() -> Self { CatalogBuilder::new().build() }
}

impl<G, R> std::fmt::Debug for Catalog<G, R> {
    fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
        f.debug_struct( "Catalog" )
            .field( "generators", &self.data.generators.keys().map( ToString::to_string ).sorted().collect::<Vec<_>>() )
            .field( "renderers", &self.data.renderers.keys().map( ToString::to_string ).sorted().collect::<Vec<_>>() )
            .field( "packages", &self.data.packages.keys().map( ToString::to_string ).sorted().collect::<Vec<_>>() )
            .field( "help", &self.data.help )
            .finish()
    }
}
