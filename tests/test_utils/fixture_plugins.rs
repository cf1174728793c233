#[allow( dead_code )]
mod fixture_plugins {

	use std::cell::RefCell ;
	use std::collections::HashMap ;

	use once_cell::sync::Lazy ;
	use texart_locator::{
		Arguments, ArgumentsTransform, Catalog, CatalogBuilder, Locator, PluginLoader,
		RelativeResource, ResourceBinding,
	};

	pub type TestCatalog = Catalog<String, String> ;

	pub fn res( text: &str ) -> RelativeResource {
		RelativeResource::parse( text ).unwrap_or_else(| err | panic!( "Invalid fixture resource {:?}: {}", text, err ))
	}

	pub fn loc( text: &str ) -> Locator {
		Locator::parse( text ).unwrap_or_else(| err | panic!( "Invalid fixture locator {:?}: {}", text, err ))
	}

	/// A factory that describes the arguments it was invoked with.
	pub fn echo( name: &'static str ) -> ResourceBinding<String> {
		ResourceBinding::factory( move | args: &Arguments | {
			let options = args.iter().map(|( key, value )| format!( "{}={}", key, value )).collect::<Vec<_>>();
			format!( "{}({})", name, options.join( "," ))
		})
	}

	/// Routes `tracing` output through the test harness. Filter with `RUST_LOG`.
	pub fn init_tracing() {
		let _ = tracing_subscriber::fmt()
			.with_env_filter( tracing_subscriber::EnvFilter::from_default_env() )
			.with_test_writer()
			.try_init();
	}

	pub fn preset( key: &'static str, value: &'static str ) -> ArgumentsTransform {
		ArgumentsTransform::new( move | args | args.clone().with( key, value ))
	}

	/// `core.dll`: the plugin every other fixture ends up in.
	pub static CORE: Lazy<TestCatalog> = Lazy::new(|| {
		let mut builder = CatalogBuilder::new();
		builder
			.set_help( "Core generators and renderers" )
			.add_generator( res( "Generators/Bright" ), echo( "bright" ), Some( "Brightness based generator" ))
			.and_then(| builder | builder.add_generator( res( "Bright" ), echo( "bright-pkg" ), None ))
			.and_then(| builder | builder.add_generator( res( "Alias" ), ResourceBinding::relative_redirect( res( "Generators/Bright" )), None ))
			.and_then(| builder | builder.add_renderer( res( "Bright" ), echo( "render" ), Some( "Plain text renderer" )))
			.and_then(| builder | builder.add_package( res( "Bright" ), Some( "Bright pair" )))
			.unwrap_or_else(| err | panic!( "Core fixture failed: {}", err ));
		builder.build()
	});

	#[derive( Debug, thiserror::Error )]
	#[error( "Unknown assembly: {0}" )]
	pub struct UnknownAssembly( pub String );

	/// Serves catalogs from a map and records every load request.
	#[derive( Default )]
	pub struct MapLoader {
		plugins: HashMap<String, TestCatalog>,
		loads: RefCell<Vec<String>>,
	}

	impl MapLoader {

		pub fn new() -> Self { Self::default().with( "core.dll", TestCatalog::clone( &CORE )) }

		pub fn with( mut self, assembly_path: &str, catalog: TestCatalog ) -> Self {
			self.plugins.insert( assembly_path.to_string(), catalog );
			self
		}

		pub fn loads( &self ) -> Vec<String> { self.loads.borrow().clone() }

	}

	impl PluginLoader for MapLoader {
		type Generator = String ;
		type Renderer = String ;
		type Plugin = TestCatalog ;
		type Error = UnknownAssembly ;

		fn load( &self, assembly_path: &str ) -> Result<Self::Plugin, Self::Error> {
			self.loads.borrow_mut().push( assembly_path.to_string() );
			self.plugins.get( assembly_path ).cloned().ok_or_else(|| UnknownAssembly( assembly_path.to_string() ))
		}
	}

}
