use super::naming::{self, Paths};
use crate::{emit::EmitError, resolve::ResolvedEnum};
use proc_macro2::{Literal, TokenStream};
use quote::quote;

/// Tokens for one enum: a `u32`-backed Rust enum with checked conversion
/// from the wire value.
pub fn emit_enum(en: &ResolvedEnum, paths: &Paths) -> Result<TokenStream, EmitError> {
    let rt = paths.runtime();
    let ident = naming::type_ident(&en.name)?;
    let qualified = en.qualified_name.as_str();

    let doc = format!(
        " Generated from {}({},{})",
        en.source.canonical_path, en.position.line, en.position.column
    );

    let variants = en
        .values
        .iter()
        .map(|v| naming::variant_ident(&v.name))
        .collect::<Result<Vec<_>, _>>()?;
    let values: Vec<_> = en
        .values
        .iter()
        .map(|v| Literal::u32_unsuffixed(v.value))
        .collect();

    let default = en
        .default_value()
        .ok_or_else(|| EmitError::EmptyEnum(en.qualified_name.clone()))?;
    let default = naming::variant_ident(&default.name)?;

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[repr(u32)]
        pub enum #ident {
            #(#variants = #values,)*
        }

        impl ::core::default::Default for #ident {
            fn default() -> Self {
                Self::#default
            }
        }

        impl ::core::convert::TryFrom<u32> for #ident {
            type Error = #rt::DecodeError;

            fn try_from(value: u32) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    #(#values => ::core::result::Result::Ok(Self::#variants),)*
                    _ => ::core::result::Result::Err(#rt::DecodeError::UnknownEnumValue {
                        enum_name: #qualified.to_string(),
                        value,
                    }),
                }
            }
        }

        impl ::core::convert::From<#ident> for u32 {
            fn from(value: #ident) -> Self {
                value as Self
            }
        }

        impl #rt::WireEnum for #ident {
            const SCHEMA_NAME: &'static str = #qualified;

            fn from_wire(value: u32) -> ::core::result::Result<Self, #rt::DecodeError> {
                <Self as ::core::convert::TryFrom<u32>>::try_from(value)
            }

            fn to_wire(self) -> u32 {
                self as u32
            }
        }

        impl #rt::SchemaEq for #ident {
            fn schema_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        impl #rt::SchemaHash for #ident {
            fn schema_hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash(self, state);
            }
        }
    })
}
