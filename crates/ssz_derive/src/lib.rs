// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Derives [`Encode`](https://docs.rs/ssz)/[`Decode`](https://docs.rs/ssz) for
//! container structs.
//!
//! Each field is encoded/decoded in declared order via `SszEncoder`/
//! `SszDecoderBuilder`, exactly as a hand-written `impl` would. A field
//! tagged `#[ssz(skip)]` is left out of both directions entirely; decoding
//! fills it back in with `Default::default()`.

use darling::FromField;
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Field, Index, parse_macro_input};

#[derive(Debug, Default, FromField)]
#[darling(attributes(ssz), default)]
struct FieldOpts {
    skip: bool,
    /// Accepted for forward compatibility with spec.md's `ssz-size` string
    /// tag; unused here because `VariableList<T, N>`/`FixedVector<T, N>`
    /// already carry their capacity in the type, leaving nothing for the
    /// tag to add.
    #[allow(dead_code)]
    ssz_size: Option<String>,
    /// See `ssz_size` above; same reasoning for `ssz-max`.
    #[allow(dead_code)]
    ssz_max: Option<String>,
}

/// One container field: its access expression (`self.name` or `self.0`) and
/// whether `#[ssz(skip)]` excludes it from the wire format.
struct ContainerField<'a> {
    accessor: proc_macro2::TokenStream,
    ident_for_construction: proc_macro2::TokenStream,
    ty: &'a syn::Type,
    skip: bool,
}

fn container_fields(data: &syn::Data) -> Vec<ContainerField<'_>> {
    let fields = match data {
        syn::Data::Struct(data) => &data.fields,
        _ => panic!("ssz_derive only supports structs"),
    };

    fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_info(i, field))
        .collect()
}

fn field_info(index: usize, field: &Field) -> ContainerField<'_> {
    let opts = FieldOpts::from_field(field).unwrap_or_default();

    let (accessor, ident_for_construction) = match &field.ident {
        Some(ident) => (quote!(#ident), quote!(#ident)),
        None => {
            let idx = Index::from(index);
            (quote!(#idx), quote!(#idx))
        }
    };

    ContainerField {
        accessor,
        ident_for_construction,
        ty: &field.ty,
        skip: opts.skip,
    }
}

/// `#[derive(Encode)]`
#[proc_macro_derive(Encode, attributes(ssz))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    let fields: Vec<_> = container_fields(&item.data)
        .into_iter()
        .filter(|f| !f.skip)
        .collect();

    let field_tys: Vec<_> = fields.iter().map(|f| f.ty).collect();
    let accessors: Vec<_> = fields.iter().map(|f| &f.accessor).collect();

    let output = quote! {
        impl #impl_generics ::ssz::Encode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                #(
                    <#field_tys as ::ssz::Encode>::is_ssz_fixed_len() &&
                )* true
            }

            fn ssz_fixed_len() -> usize {
                if <Self as ::ssz::Encode>::is_ssz_fixed_len() {
                    let mut len = 0;
                    #(
                        len += <#field_tys as ::ssz::Encode>::ssz_fixed_len();
                    )*
                    len
                } else {
                    ::ssz::BYTES_PER_LENGTH_OFFSET
                }
            }

            fn ssz_bytes_len(&self) -> usize {
                if <Self as ::ssz::Encode>::is_ssz_fixed_len() {
                    <Self as ::ssz::Encode>::ssz_fixed_len()
                } else {
                    let mut len = 0;
                    #(
                        len += if <#field_tys as ::ssz::Encode>::is_ssz_fixed_len() {
                            <#field_tys as ::ssz::Encode>::ssz_fixed_len()
                        } else {
                            ::ssz::BYTES_PER_LENGTH_OFFSET + self.#accessors.ssz_bytes_len()
                        };
                    )*
                    len
                }
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                let mut fixed_len = 0;
                #(
                    fixed_len += if <#field_tys as ::ssz::Encode>::is_ssz_fixed_len() {
                        <#field_tys as ::ssz::Encode>::ssz_fixed_len()
                    } else {
                        ::ssz::BYTES_PER_LENGTH_OFFSET
                    };
                )*

                let mut encoder = ::ssz::SszEncoder::container(buf, fixed_len);
                #(
                    encoder.append(&self.#accessors);
                )*
                encoder.finalize();
            }
        }
    };

    output.into()
}

/// `#[derive(Decode)]`
#[proc_macro_derive(Decode, attributes(ssz))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    let all_fields = container_fields(&item.data);
    let decoded_fields: Vec<_> = all_fields.iter().filter(|f| !f.skip).collect();
    let decoded_tys: Vec<_> = decoded_fields.iter().map(|f| f.ty).collect();

    let is_tuple_struct = matches!(&item.data, syn::Data::Struct(data) if matches!(data.fields, syn::Fields::Unnamed(_)));

    let construct_fields = all_fields.iter().map(|f| {
        let ident = &f.ident_for_construction;
        if f.skip {
            quote!(#ident: ::std::default::Default::default())
        } else {
            quote!(#ident: decoder.decode_next()?)
        }
    });

    let construction = if is_tuple_struct {
        quote! { Self ( #( #construct_fields ),* ) }
    } else {
        quote! { Self { #( #construct_fields ),* } }
    };

    let output = quote! {
        impl #impl_generics ::ssz::Decode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                #(
                    <#decoded_tys as ::ssz::Decode>::is_ssz_fixed_len() &&
                )* true
            }

            fn ssz_fixed_len() -> usize {
                if <Self as ::ssz::Decode>::is_ssz_fixed_len() {
                    let mut len = 0;
                    #(
                        len += <#decoded_tys as ::ssz::Decode>::ssz_fixed_len();
                    )*
                    len
                } else {
                    ::ssz::BYTES_PER_LENGTH_OFFSET
                }
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ::ssz::DecodeError> {
                let mut builder = ::ssz::SszDecoderBuilder::new(bytes);
                #(
                    builder.register_type::<#decoded_tys>()?;
                )*
                let mut decoder = builder.build()?;

                Ok(#construction)
            }
        }
    };

    output.into()
}
