// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitInt, LitStr, Path, Token};

/// Field-level `#[bin(...)]` options.
#[derive(Default)]
struct FieldAttrs {
    index: Option<i32>,
    generation: Option<u16>,
    required: bool,
    skip: bool,
    read_only: bool,
}

/// Container-level `#[bin(...)]` options.
#[derive(Default)]
struct ContainerAttrs {
    converter: Option<Path>,
    mode: Option<proc_macro2::TokenStream>,
}

/// `#[derive(Binary)]` macro: generates the type's `Shape`
///
/// Supports:
/// - Structs with named fields (the struct must implement `Default`)
/// - Fieldless enums, encoded as their `#[repr]` integer (`i32` if absent)
/// - Any struct, including tuple structs, carrying `#[bin(converter = ...)]`
///
/// Field attributes: `index = N` (`N` may be negative), `generation = G`, `required`, `skip`,
/// `read_only`. Container attributes: `converter = Path`, optionally with
/// `mode = "safe"` or `mode = "unsafe"`.
///
/// Example:
/// ```ignore
/// use ubin::Binary;
///
/// #[derive(Default, Binary)]
/// struct Player {
///     #[bin(index = 0)]
///     health: i32,
///     #[bin(index = 1, generation = 2)]
///     hunger: i32,
/// }
/// ```
#[proc_macro_derive(Binary, attributes(bin))]
pub fn derive_binary(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Binary cannot be derived for generic types",
        ));
    }
    let container = parse_container_attrs(input)?;

    match &input.data {
        Data::Enum(data) => {
            if container.converter.is_some() {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "converter overrides are only supported on structs",
                ));
            }
            expand_enum(input, data)
        }
        Data::Struct(data) => match (&data.fields, &container.converter) {
            (_, Some(path)) if container.mode.is_none() => Ok(expand_custom(input, path)),
            (Fields::Named(fields), _) => expand_struct(input, &fields.named, &container),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                "Only named fields are supported without #[bin(converter = ...)]",
            )),
        },
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Only structs and enums are supported",
        )),
    }
}

fn converter_override(
    path: &Path,
    mode: Option<&proc_macro2::TokenStream>,
) -> proc_macro2::TokenStream {
    let restrict = mode.map(|mode| quote! { .only_for(#mode) });
    quote! {
        ::ubin::ConverterOverride::new(|| {
            ::ubin::erase::<Self, #path>(<#path as ::core::default::Default>::default())
        })
        #restrict
    }
}

fn expand_custom(input: &DeriveInput, path: &Path) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let override_tokens = converter_override(path, None);
    quote! {
        impl ::ubin::Binary for #name {
            fn shape() -> ::ubin::Shape {
                ::ubin::Shape::Struct(::ubin::StructShape::custom(#override_tokens))
            }
        }
    }
}

fn expand_struct(
    input: &DeriveInput,
    fields: &syn::punctuated::Punctuated<syn::Field, syn::token::Comma>,
    container: &ContainerAttrs,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let mut members = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let attrs = parse_field_attrs(field)?;
        if attrs.skip {
            continue;
        }
        let ty = &field.ty;
        let name_str = field_name.to_string();

        let decl = if attrs.read_only {
            quote! {
                ::ubin::MemberDecl::read_only::<Self, #ty>(#name_str, |s| &s.#field_name)
            }
        } else {
            quote! {
                ::ubin::MemberDecl::field::<Self, #ty>(
                    #name_str,
                    |s| &s.#field_name,
                    |s, v| s.#field_name = v,
                )
            }
        };
        let index = attrs.index.map(|index| quote! { .index(#index) });
        let generation = attrs
            .generation
            .map(|generation| quote! { .generation(#generation) });
        let required = attrs.required.then(|| quote! { .required() });

        members.push(quote! {
            .member(#decl #index #generation #required)
        });
    }

    let converter = container.converter.as_ref().map(|path| {
        let override_tokens = converter_override(path, container.mode.as_ref());
        quote! { .converter(#override_tokens) }
    });

    Ok(quote! {
        impl ::ubin::Binary for #name {
            fn shape() -> ::ubin::Shape {
                ::ubin::Shape::Struct(
                    ::ubin::StructShape::builder::<Self>()
                        #(#members)*
                        #converter
                        .build(),
                )
            }
        }
    })
}

fn expand_enum(input: &DeriveInput, data: &syn::DataEnum) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let repr = enum_repr(input)?;

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "Binary cannot be derived for enums without variants",
        ));
    }
    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Only fieldless enum variants are supported",
            ));
        }
        variants.push(&variant.ident);
    }

    Ok(quote! {
        impl ::ubin::BinaryEnum for #name {
            type Repr = #repr;

            fn to_repr(&self) -> #repr {
                match self {
                    #(Self::#variants => Self::#variants as #repr,)*
                }
            }

            fn from_repr(repr: #repr) -> ::core::option::Option<Self> {
                #(
                    if repr == Self::#variants as #repr {
                        return ::core::option::Option::Some(Self::#variants);
                    }
                )*
                ::core::option::Option::None
            }
        }

        impl ::ubin::Binary for #name {
            fn shape() -> ::ubin::Shape {
                ::ubin::Shape::Enum(::ubin::EnumShape::of::<Self>())
            }
        }
    })
}

/// Integer type named by `#[repr(..)]`, defaulting to `i32`.
fn enum_repr(input: &DeriveInput) -> syn::Result<Ident> {
    const INTEGERS: [&str; 8] = ["u8", "i8", "u16", "i16", "u32", "i32", "u64", "i64"];

    let mut repr = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                if INTEGERS.contains(&ident.to_string().as_str()) {
                    repr = Some(ident.clone());
                } else if ident == "usize" || ident == "isize" {
                    return Err(meta.error("pointer-sized enum representations are not portable"));
                }
            }
            Ok(())
        })?;
    }
    Ok(repr.unwrap_or_else(|| Ident::new("i32", proc_macro2::Span::call_site())))
}

fn parse_container_attrs(input: &DeriveInput) -> syn::Result<ContainerAttrs> {
    let mut attrs = ContainerAttrs::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("bin")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("converter") {
                attrs.converter = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("mode") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.mode = Some(match lit.value().as_str() {
                    "safe" => quote! { ::ubin::Mode::Safe },
                    "unsafe" => quote! { ::ubin::Mode::Unsafe },
                    _ => return Err(syn::Error::new_spanned(lit, "expected \"safe\" or \"unsafe\"")),
                });
                Ok(())
            } else {
                Err(meta.error("unsupported container attribute"))
            }
        })?;
    }
    if attrs.mode.is_some() && attrs.converter.is_none() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[bin(mode = ...)] requires #[bin(converter = ...)]",
        ));
    }
    Ok(attrs)
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("bin")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("index") {
                let value = meta.value()?;
                let negative = value.parse::<Option<Token![-]>>()?.is_some();
                let lit: LitInt = value.parse()?;
                let magnitude: i64 = lit.base10_parse()?;
                let index = if negative { -magnitude } else { magnitude };
                attrs.index = Some(
                    i32::try_from(index)
                        .map_err(|_| syn::Error::new_spanned(&lit, "index out of range for i32"))?,
                );
            } else if meta.path.is_ident("generation") {
                let lit: LitInt = meta.value()?.parse()?;
                attrs.generation = Some(lit.base10_parse()?);
            } else if meta.path.is_ident("required") {
                attrs.required = true;
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
            } else if meta.path.is_ident("read_only") {
                attrs.read_only = true;
            } else {
                return Err(meta.error("unsupported field attribute"));
            }
            Ok(())
        })?;
    }
    Ok(attrs)
}
