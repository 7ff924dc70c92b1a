use darling::{ast, FromDeriveInput, FromField, FromMeta};
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::Meta;

#[derive(Debug, FromMeta)]
struct ModelArgs {
	#[darling(default)]
	create: bool,
	#[darling(default)]
	update: bool,
	#[darling(default)]
	patch: bool,
}

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs)]
struct ModelInputReceiver {
	ident: syn::Ident,

	generics: syn::Generics,

	data: ast::Data<(), ModelFieldReceiver>,

	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(forward_attrs)]
struct ModelFieldReceiver {
	ident: Option<syn::Ident>,

	ty: syn::Type,
	vis: syn::Visibility,

	attrs: Vec<syn::Attribute>,
}

/// Whether the field carries #[serde(skip_deserializing)] or #[serde(skip)].
fn is_server_owned(attrs: &[syn::Attribute]) -> bool {
	attrs.iter().any(|attr| {
		let Meta::List(ref list) = attr.meta else {
			return false;
		};

		if !list.path.is_ident("serde") {
			return false;
		}

		list.tokens.to_token_stream().into_iter().any(|token| {
			matches!(token, TokenTree::Ident(ref ident) if ident == "skip_deserializing" || ident == "skip")
		})
	})
}

pub fn from_input(
	args: proc_macro::TokenStream,
	input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
	let args = match ast::NestedMeta::parse_meta_list(args.into()) {
		Ok(x) => x,
		Err(e) => return e.into_compile_error().into(),
	};

	let args = match ModelArgs::from_list(&args) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	if !(args.create || args.update || args.patch) {
		return darling::Error::custom("expected at least one of `create`, `update` or `patch`")
			.write_errors()
			.into();
	}

	let input = syn::parse_macro_input!(input as syn::DeriveInput);
	let receiver = match ModelInputReceiver::from_derive_input(&input) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let attrs = &receiver.attrs;

	let Some(fields) = receiver.data.take_struct() else {
		return darling::Error::unsupported_shape("expected a struct with named fields")
			.write_errors()
			.into();
	};

	let fields = fields
		.iter()
		.filter_map(|field| {
			if is_server_owned(&field.attrs) {
				return None;
			}

			Some((&field.attrs, field.ident.as_ref()?, &field.ty, &field.vis))
		})
		.collect::<Vec<_>>();

	let inputs = [
		(args.create, format_ident!("Create{}Input", ident), false),
		(args.update, format_ident!("Update{}Input", ident), false),
		(args.patch, format_ident!("Patch{}Input", ident), true),
	]
	.into_iter()
	.filter(|(enabled, ..)| *enabled)
	.map(|(_, name, optional)| {
		let body = fields.iter().map(|(attrs, ident, ty, vis)| {
			if optional {
				quote! {
					#(#attrs)*
					#vis #ident: Option<#ty>,
				}
			} else {
				quote! {
					#(#attrs)*
					#vis #ident: #ty,
				}
			}
		});

		quote! {
			#(#attrs)*
			#vis struct #name #generics {
				#(
					#body
				)*
			}
		}
	})
	.collect::<Vec<_>>();

	quote! {
		#input

		#(
			#inputs
		)*
	}
	.into()
}
