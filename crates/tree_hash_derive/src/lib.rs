// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Derives [`TreeHash`](https://docs.rs/tree_hash) for container structs.
//!
//! The generated `tree_hash_root` merkleizes one leaf per field, in
//! declared order, mirroring `ssz_derive`'s field order exactly. A field
//! tagged `#[ssz(skip)]` contributes no leaf at all. `SignedRoot` is also
//! derived, merkleizing every leaf except the container's last field — the
//! `signing_root` used to separate a signed envelope from its signature.

use darling::FromField;
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Field, Index, parse_macro_input};

#[derive(Debug, Default, FromField)]
#[darling(attributes(ssz), default)]
struct FieldOpts {
    skip: bool,
}

struct ContainerField<'a> {
    accessor: proc_macro2::TokenStream,
    ty: &'a syn::Type,
    skip: bool,
}

fn container_fields(data: &syn::Data) -> Vec<ContainerField<'_>> {
    let fields = match data {
        syn::Data::Struct(data) => &data.fields,
        _ => panic!("tree_hash_derive only supports structs"),
    };

    fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_info(i, field))
        .collect()
}

fn field_info(index: usize, field: &Field) -> ContainerField<'_> {
    let opts = FieldOpts::from_field(field).unwrap_or_default();

    let accessor = match &field.ident {
        Some(ident) => quote!(#ident),
        None => {
            let idx = Index::from(index);
            quote!(#idx)
        }
    };

    ContainerField {
        accessor,
        ty: &field.ty,
        skip: opts.skip,
    }
}

/// `#[derive(TreeHash)]`
#[proc_macro_derive(TreeHash, attributes(ssz))]
pub fn derive_tree_hash(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    let fields: Vec<_> = container_fields(&item.data)
        .into_iter()
        .filter(|f| !f.skip)
        .collect();

    if fields.is_empty() {
        panic!("tree_hash_derive requires at least one non-skipped field");
    }

    let accessors: Vec<_> = fields.iter().map(|f| &f.accessor).collect();
    let num_fields = accessors.len();

    let signing_accessors = &accessors[..num_fields - 1];
    let num_signing_fields = signing_accessors.len();

    let output = quote! {
        impl #impl_generics ::tree_hash::TreeHash<::tree_hash::Sha256Hasher> for #name #ty_generics #where_clause {
            fn tree_hash_type() -> ::tree_hash::TreeHashType {
                ::tree_hash::TreeHashType::Container
            }

            fn tree_hash_packed_encoding(&self) -> ::tree_hash::PackedEncoding {
                unreachable!("Container should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Container should never be packed.")
            }

            fn tree_hash_root(&self) -> ::tree_hash::Hash256 {
                let mut hasher = ::tree_hash::MerkleHasher::<::tree_hash::Sha256Hasher>::with_leaves(#num_fields);
                #(
                    hasher
                        .write(::tree_hash::TreeHash::<::tree_hash::Sha256Hasher>::tree_hash_root(&self.#accessors).as_ref())
                        .expect("tree hash derive should not produce more leaves than fields");
                )*
                hasher
                    .finish()
                    .expect("tree hash derive should not leave a remaining buffer")
            }
        }

        impl #impl_generics ::tree_hash::SignedRoot for #name #ty_generics #where_clause {
            fn signing_root(&self) -> ::tree_hash::Hash256 {
                let mut hasher = ::tree_hash::MerkleHasher::<::tree_hash::Sha256Hasher>::with_leaves(#num_signing_fields);
                #(
                    hasher
                        .write(::tree_hash::TreeHash::<::tree_hash::Sha256Hasher>::tree_hash_root(&self.#signing_accessors).as_ref())
                        .expect("signing root derive should not produce more leaves than fields");
                )*
                hasher
                    .finish()
                    .expect("signing root derive should not leave a remaining buffer")
            }
        }
    };

    output.into()
}
