#[macro_export]
macro_rules! assert_partition {
	( $text:expr, $assembly:expr, $resource:expr ) => {{
		let locator = texart_locator::Locator::parse( $text )
			.unwrap_or_else(| err | panic!( "Failed to parse {:?}: {}", $text, err ));
		assert_eq!( locator.assembly_path(), $assembly, "assembly path of {:?}", $text );
		assert_eq!( locator.resource_path(), $resource, "resource path of {:?}", $text );
		locator
	}};
}
