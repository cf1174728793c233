use texart_locator::{ Arguments, CatalogBuilder, ResolveError, Resolver, ResolverOptions, ResourceBinding };

use crate::fixture_plugins::{ CORE, MapLoader, TestCatalog, init_tracing, loc, res };

fn ping_pong() -> TestCatalog {
	let mut builder = CatalogBuilder::new();
	builder
		.add_generator( res( "Ping" ), ResourceBinding::relative_redirect( res( "Pong" )), None ).unwrap()
		.add_generator( res( "Pong" ), ResourceBinding::relative_redirect( res( "Ping" )), None ).unwrap();
	builder.build()
}

#[test]
fn default_options() {
	let options = ResolverOptions::default();
	assert_eq!( options.max_hops(), ResolverOptions::DEFAULT_MAX_HOPS );
	assert!( options.detects_cycles() );
}

#[test]
fn relative_cycle_is_detected() {
	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader );

	match resolver.resolve_generator( &ping_pong(), &loc( "tx:///loop.dll:Ping" ), Arguments::new() ) {
		Err( ResolveError::CycleDetected { locator }) => assert_eq!( locator, loc( "tx:///loop.dll:Ping" )),
		other => panic!( "Expected CycleDetected, found: {:?}", other ),
	}
}

#[test]
fn cross_plugin_self_redirect_is_detected() {
	init_tracing();
	let mut selfish = CatalogBuilder::new();
	selfish.add_generator( res( "Me" ), ResourceBinding::redirect( loc( "tx:///self.dll:Me" )), None ).unwrap();
	let selfish: TestCatalog = selfish.build();

	let loader = MapLoader::new().with( "self.dll", selfish.clone() );
	let resolver = Resolver::new( &loader );

	match resolver.resolve_generator( &selfish, &loc( "tx:///self.dll:Me" ), Arguments::new() ) {
		Err( ResolveError::CycleDetected { locator }) => assert_eq!( locator, loc( "tx:///self.dll:Me" )),
		other => panic!( "Expected CycleDetected, found: {:?}", other ),
	}
	assert_eq!( loader.loads(), vec![ "self.dll", "self.dll" ]);
}

#[test]
fn hop_limit_ends_cycles_when_detection_is_disabled() {
	init_tracing();
	let loader = MapLoader::new();
	let options = ResolverOptions::default().with_max_hops( 5 ).with_cycle_detection( false );
	let resolver = Resolver::new( &loader ).with_options( options );

	match resolver.resolve_generator( &ping_pong(), &loc( "tx:///loop.dll:Ping" ), Arguments::new() ) {
		Err( ResolveError::HopLimitExceeded { limit, locator }) => {
			assert_eq!( limit, 5 );
			assert_eq!( locator, loc( "tx:///loop.dll:Ping" ));
		},
		other => panic!( "Expected HopLimitExceeded, found: {:?}", other ),
	}
}

#[test]
fn chain_of_exactly_max_hops_succeeds() {
	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader ).with_options( ResolverOptions::default().with_max_hops( 1 ));

	let resolved = resolver.resolve_generator( &CORE, &loc( "tx:///core.dll:Alias" ), Arguments::new() ).unwrap();
	assert_eq!( resolved.hops(), 1 );
}

#[test]
fn zero_hops_accepts_direct_factories_only() {
	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader ).with_options( ResolverOptions::default().with_max_hops( 0 ));

	assert!( resolver.resolve_generator( &CORE, &loc( "tx:///core.dll:Bright" ), Arguments::new() ).is_ok() );

	match resolver.resolve_generator( &CORE, &loc( "tx:///core.dll:Alias" ), Arguments::new() ) {
		Err( ResolveError::HopLimitExceeded { limit: 0, locator }) => assert_eq!( locator, loc( "tx:///core.dll:Generators/Bright" )),
		other => panic!( "Expected HopLimitExceeded, found: {:?}", other ),
	}
}

#[test]
fn spent_budget_stops_before_loading_the_target() {
	let mut alias = CatalogBuilder::new();
	alias.add_generator( res( "Big" ), ResourceBinding::redirect( loc( "tx:///core.dll:Generators/Bright" )), None ).unwrap();
	let alias: TestCatalog = alias.build();

	let loader = MapLoader::new();
	let resolver = Resolver::new( &loader ).with_options( ResolverOptions::default().with_max_hops( 0 ));

	match resolver.resolve_generator( &alias, &loc( "tx:///alias.dll:Big" ), Arguments::new() ) {
		Err( ResolveError::HopLimitExceeded { limit: 0, locator }) => assert_eq!( locator, loc( "tx:///core.dll:Generators/Bright" )),
		other => panic!( "Expected HopLimitExceeded, found: {:?}", other ),
	}
	assert!( loader.loads().is_empty() );
}
