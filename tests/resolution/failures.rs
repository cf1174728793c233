use texart_locator::{ Arguments, CatalogBuilder, CatalogError, RelativeResource, ResolveError, Resolver, ResourceBinding, ResourceKind };

use crate::fixture_plugins::{ CORE, MapLoader, TestCatalog, loc, res };

#[test]
fn missing_resource_is_a_lookup_error() {
	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader );

	match resolver.resolve_generator( &CORE, &loc( "tx:///core.dll:Nope" ), Arguments::new() ) {
		Err( ResolveError::Lookup( CatalogError::ResourceNotFound { kind: ResourceKind::Generator, resource })) => assert_eq!( resource, res( "Nope" )),
		other => panic!( "Expected ResourceNotFound, found: {:?}", other ),
	}
}

#[test]
fn generator_names_do_not_resolve_as_renderers() {
	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader );

	match resolver.resolve_renderer( &CORE, &loc( "tx:///core.dll:Alias" ), Arguments::new() ) {
		Err( ResolveError::Lookup( CatalogError::ResourceNotFound { kind: ResourceKind::Renderer, .. })) => {}
		other => panic!( "Expected ResourceNotFound, found: {:?}", other ),
	}
}

#[test]
fn missing_target_of_a_redirect_is_reported() {
	let mut alias = CatalogBuilder::new();
	alias.add_generator( res( "Dangling" ), ResourceBinding::redirect( loc( "tx:///core.dll:Gone" )), None ).unwrap();
	let alias: TestCatalog = alias.build();

	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader );

	match resolver.resolve_generator( &alias, &loc( "tx:///alias.dll:Dangling" ), Arguments::new() ) {
		Err( ResolveError::Lookup( CatalogError::ResourceNotFound { resource, .. })) => assert_eq!( resource, res( "Gone" )),
		other => panic!( "Expected ResourceNotFound, found: {:?}", other ),
	}
}

#[test]
fn load_failure_names_the_assembly() {
	let mut alias = CatalogBuilder::new();
	alias.add_generator( res( "Elsewhere" ), ResourceBinding::redirect( loc( "tx:///plugins/missing.dll:X" )), None ).unwrap();
	let alias: TestCatalog = alias.build();

	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader );

	match resolver.resolve_generator( &alias, &loc( "tx:///alias.dll:Elsewhere" ), Arguments::new() ) {
		Err( ResolveError::Load { assembly_path, source }) => {
			assert_eq!( assembly_path, "plugins/missing.dll" );
			assert_eq!( source.0, "plugins/missing.dll" );
		},
		other => panic!( "Expected Load, found: {:?}", other ),
	}
	assert_eq!( loader.loads(), vec![ "plugins/missing.dll" ]);
}

#[test]
fn relative_redirect_that_changes_the_assembly_is_rejected() {
	let mut broken = CatalogBuilder::new();
	broken.add_generator( res( "Broken" ), ResourceBinding::relative_redirect( RelativeResource::from_segments([ "a:b" ])), None ).unwrap();
	let broken: TestCatalog = broken.build();

	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader );

	match resolver.resolve_generator( &broken, &loc( "tx:///broken.dll:Broken" ), Arguments::new() ) {
		Err( ResolveError::InvalidRedirect( _ )) => {}
		other => panic!( "Expected InvalidRedirect, found: {:?}", other ),
	}
}
