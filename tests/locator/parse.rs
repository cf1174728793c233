use std::collections::HashSet ;
use texart_locator::{ Locator, RelativeResource };

#[test]
fn parse_splits_assembly_and_resource() {
	let locator = assert_partition!(
		"file:///plugins/Texart.SomePlugin.dll:SomePath/SomeResource",
		"plugins/Texart.SomePlugin.dll",
		"SomePath/SomeResource"
	);
	assert_eq!( locator.scheme().as_str(), "file" );
	assert_eq!( locator.assembly_segments(), [ "plugins", "Texart.SomePlugin.dll" ]);
	assert_eq!( locator.resource_segments(), [ "SomePath", "SomeResource" ]);
}

#[test]
fn parse_keeps_colons_inside_assembly_path() {
	assert_partition!( "tx:///path:to/plugin:foo.dll:resource/path", "path:to/plugin:foo.dll", "resource/path" );
}

#[test]
fn parse_splits_at_last_colon_of_rightmost_segment() {
	assert_partition!( "tx:///a:b:c", "a:b", "c" );
	assert_partition!( "tx:///a:b/c:d/e", "a:b/c", "d/e" );
}

#[test]
fn parse_lone_separator_gives_empty_halves() {
	let locator = assert_partition!( "tx:///:", "", "" );
	assert_eq!( locator.assembly_segments(), [ "" ]);
	assert_eq!( locator.resource_segments(), [ "" ]);
	assert!( locator.relative_resource().is_empty() );
}

#[test]
fn parse_trailing_slash_keeps_empty_resource_segment() {
	let locator = assert_partition!( "tx:///a.dll:r/", "a.dll", "r/" );
	assert_eq!( locator.resource_segments(), [ "r", "" ]);
}

#[test]
fn parse_leading_slash_in_resource_keeps_empty_segment() {
	let locator = assert_partition!( "tx:///a.dll:/r", "a.dll", "/r" );
	assert_eq!( locator.resource_segments(), [ "", "r" ]);
}

#[test]
fn parse_escaped_colon_is_not_a_separator() {
	let locator = assert_partition!( "tx:///dir:x/a%3Ab.dll:res%3Aource", "dir:x/a%3Ab.dll", "res%3Aource" );
	assert_eq!( locator.assembly_path_decoded(), "dir:x/a:b.dll" );
	assert_eq!( locator.resource_path_decoded(), "res:ource" );
}

#[test]
fn parse_round_trips_with_lower_cased_scheme() {
	for ( input, expected ) in [
		( "tx:///a.dll:r", "tx:///a.dll:r" ),
		( "TX:///a.dll:r", "tx:///a.dll:r" ),
		( "Tx-2:///Dir/A.dll:Res/Path", "tx-2:///Dir/A.dll:Res/Path" ),
		( "tx:///path:to/plugin:foo.dll:resource/path", "tx:///path:to/plugin:foo.dll:resource/path" ),
	] {
		let locator = Locator::parse( input ).unwrap();
		assert_eq!( locator.to_string(), expected );
		assert_eq!( locator.as_str(), expected );
	}
}

#[test]
fn parse_halves_reconstruct_the_path() {
	for input in [
		"tx:///a.dll:r",
		"tx:///path:to/plugin:foo.dll:resource/path",
		"tx:///:",
		"tx:///x/y/z.dll:a/b/c",
		"tx:///a.dll:/r/",
	] {
		let locator = Locator::parse( input ).unwrap();
		let rebuilt = format!( "tx:///{}:{}", locator.assembly_path(), locator.resource_path() );
		assert_eq!( rebuilt, input );
	}
}

#[test]
fn locators_compare_by_canonical_text() {
	let lower = Locator::parse( "tx:///a.dll:r" ).unwrap();
	let upper = Locator::parse( "TX:///a.dll:r" ).unwrap();
	let other = Locator::parse( "tx:///a.dll:s" ).unwrap();
	assert_eq!( lower, upper );
	assert_ne!( lower, other );

	let set = HashSet::from([ lower, upper, other ]);
	assert_eq!( set.len(), 2 );
}

#[test]
fn resource_half_matches_standalone_relative_resource() {
	for ( assembly, resource ) in [
		( "a.dll", "r" ),
		( "path:to/plugin:foo.dll", "resource/path" ),
		( "x", "" ),
		( "x/y", "/lead/trail/" ),
		( "x", "with%20space" ),
	] {
		let locator = Locator::parse( &format!( "tx:///{}:{}", assembly, resource )).unwrap();
		assert_eq!( locator.relative_resource(), &RelativeResource::parse( resource ).unwrap(), "resource {:?}", resource );
	}
}

#[test]
fn resource_half_matches_relative_resource_under_every_scheme() {
	for scheme in [ "tx", "file", "http", "ws" ] {
		for resource in [ "a\\b", "dir\\sub/leaf", "C|/x", "r" ] {
			let locator = Locator::parse( &format!( "{}:///asm:{}", scheme, resource )).unwrap();
			assert_eq!(
				locator.relative_resource(),
				&RelativeResource::parse( resource ).unwrap(),
				"resource {:?} under {:?}", resource, scheme,
			);
		}
	}
}

#[test]
fn file_paths_are_not_rewritten() {
	let locator = assert_partition!( "file:///C:/dir\\x/a.dll:Res\\Path", "C:/dir\\x/a.dll", "Res\\Path" );
	assert_eq!( locator.as_str(), "file:///C:/dir\\x/a.dll:Res\\Path" );
	assert_eq!( locator.resource_segments(), [ "Res\\Path" ]);
}

#[test]
fn from_str_matches_parse() {
	let parsed: Locator = "tx:///a.dll:r".parse().unwrap();
	assert_eq!( parsed, Locator::parse( "tx:///a.dll:r" ).unwrap() );
}
