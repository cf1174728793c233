//! Resource addressing and redirect resolution for Texart plugins.
//!
//! Texart plugins are independently loadable units that offer named **generators**
//! (turning images into text) and **renderers** (turning text back into images).
//! This crate does not load plugins or run any of their code. It names their
//! resources, lets each unit publish a catalog of them, and follows redirects
//! between resources until it reaches something that can actually be built.
//!
//! # Core Concepts
//!
//! - [`Locator`]: An absolute address such as `tx:///plugins/foo.dll:Generators/Bright`.
//! 	The path holds an **assembly path** (`plugins/foo.dll`, selecting the plugin unit)
//! 	and a **resource path** (`Generators/Bright`, selecting a resource inside it),
//! 	split at the last `:` of the right-most segment containing one.
//!
//! - [`SchemeToken`]: The case-insensitive scheme in front of `://`.
//!
//! - [`RelativeResource`]: A resource path on its own, used to address resources
//! 	within a single plugin unit.
//!
//! - [`ResourceBinding`]: What a lookup returns. Either a [`Factory`], a
//! 	[`Redirect`]( ResourceBinding::Redirect ) to a locator that may live in another
//! 	unit, or a [`RelativeRedirect`]( ResourceBinding::RelativeRedirect ) within the
//! 	same unit. Redirects may rewrite the [`Arguments`] passed along.
//!
//! - [`Catalog`]: The immutable registry a plugin unit publishes, assembled with a
//! 	[`CatalogBuilder`].
//!
//! - [`Resolver`]: Follows bindings across units, loading them through a
//! 	host-provided [`PluginLoader`], until a factory is found.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap ;
//! use texart_locator::{
//! 	Arguments, ArgumentsTransform, Catalog, CatalogBuilder, Locator, PluginLoader,
//! 	RelativeResource, ResourceBinding, Resolver,
//! };
//!
//! #[derive( Debug, thiserror::Error )]
//! #[error( "Unknown assembly: {0}" )]
//! struct UnknownAssembly( String );
//!
//! // The host decides how assembly paths map to plugin units.
//! struct Plugins( HashMap<String, Catalog<String, String>> );
//!
//! impl PluginLoader for Plugins {
//! 	type Generator = String ;
//! 	type Renderer = String ;
//! 	type Plugin = Catalog<String, String> ;
//! 	type Error = UnknownAssembly ;
//! 	fn load( &self, assembly_path: &str ) -> Result<Self::Plugin, Self::Error> {
//! 		self.0.get( assembly_path ).cloned().ok_or_else(|| UnknownAssembly( assembly_path.to_string() ))
//! 	}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // A plugin that implements a generator.
//! let mut core = CatalogBuilder::new();
//! core.add_generator(
//! 	RelativeResource::parse( "Generators/Bright" )?,
//! 	ResourceBinding::factory(| args: &Arguments | format!( "bright x{}", args.get( "scale" ).unwrap_or( "1" ))),
//! 	Some( "Brightness based generator" ),
//! )?;
//!
//! // A plugin that only forwards to it, presetting an option.
//! let mut alias = CatalogBuilder::new();
//! alias.add_generator(
//! 	RelativeResource::parse( "Big" )?,
//! 	ResourceBinding::redirect_with(
//! 		Locator::parse( "tx:///core.dll:Generators/Bright" )?,
//! 		ArgumentsTransform::new(| args | args.clone().with( "scale", "4" )),
//! 	),
//! 	None,
//! )?;
//! let alias: Catalog<String, String> = alias.build();
//!
//! let resolver = Resolver::new( Plugins( HashMap::from([( "core.dll".to_string(), core.build() )])));
//! let resolved = resolver.resolve_generator( &alias, &Locator::parse( "tx:///alias.dll:Big" )?, Arguments::new() )?;
//!
//! assert_eq!( resolved.factory().call( resolved.arguments() ), "bright x4" );
//! assert_eq!( resolved.locator().assembly_path(), "core.dll" );
//! # Ok(())
//! # }
//! ```
//!
//! # Redirect Chains
//!
//! Redirects may point at further redirects. The [`Resolver`] bounds every chain:
//! returning to a locator it already visited in the same unit fails with
//! [`ResolveError::CycleDetected`], and following more than
//! [`ResolverOptions::max_hops`] redirects fails with
//! [`ResolveError::HopLimitExceeded`]. Both are configurable through
//! [`ResolverOptions`].
//!
//! # Logging
//!
//! Resolution steps are reported through [`tracing`] at `debug` level, catalog
//! lookups at `trace` level, and aborted chains at `warn` level. The crate never
//! installs a subscriber.

mod arguments ;
mod binding ;
mod catalog ;
mod locator ;
mod plugin ;
mod relative_resource ;
mod resolver ;
mod scheme ;

pub use arguments::{ Arguments, ArgumentsTransform };
pub use binding::{ BindingError, BindingKind, Factory, ResourceBinding };
pub use catalog::{ Catalog, CatalogBuilder, CatalogError, HelpError, Package, ResourceKind };
pub use locator::{ Locator, LocatorError, SEPARATOR };
pub use plugin::{ Plugin, PluginLoader };
pub use relative_resource::RelativeResource ;
pub use resolver::{ ResolveError, Resolved, Resolver, ResolverOptions };
pub use scheme::SchemeToken ;
