mod model;
mod route;

use proc_macro::TokenStream;

/// Creates a documentation function for the route, named after the original function with the suffix `_docs`.
///
/// The first line of the doc comment becomes the summary, the rest becomes the description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Creates input structs for the model, selected by the arguments:
///
/// - `create`: `CreateXInput` with every client-writable field.
/// - `update`: `UpdateXInput` with the same fields, used for full replacement.
/// - `patch`: `PatchXInput` where every field is wrapped in `Option`.
///
/// Fields with #[serde(skip_deserializing)] or #[serde(skip)] are owned by the server
/// and left out. All other fields are copied verbatim (including attributes).
#[proc_macro_attribute]
pub fn model(args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(args, input)
}
