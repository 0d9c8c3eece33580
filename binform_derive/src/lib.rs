//! Procedural derive macros for the `binform` serialization traits.
//!
//! `#[derive(Encode)]` and `#[derive(Decode)]` generate implementations for
//! structs and enums. Both directions are derived from the same declaration,
//! so the field order written to the wire and the field order read back can
//! never disagree. Enum variants are encoded as a `u32` index in declaration
//! order followed by the variant's fields; unknown indices fail decoding.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DataEnum, DeriveInput, Fields,
    Generics, Ident, Index,
};

/// Derives the `binform::Encode` trait for a struct or enum.
///
/// Fields are encoded in declaration order; every generic type parameter
/// receives an `Encode` bound. Unions are rejected.
///
/// # Example
///
/// ```ignore
/// #[derive(Encode)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
/// ```
#[proc_macro_derive(Encode)]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_encode(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derives the `binform::Decode` trait for a struct or enum.
///
/// Fields are decoded in declaration order, mirroring `Encode` exactly;
/// every generic type parameter receives a `Decode` bound. Unions are
/// rejected.
///
/// # Example
///
/// ```ignore
/// #[derive(Decode)]
/// enum Message {
///     Quit,
///     Move { x: i32, y: i32 },
///     Write(String),
/// }
/// ```
#[proc_macro_derive(Decode)]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_decode(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_encode(
    input: &DeriveInput,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;

    let body = match &input.data {
        Data::Struct(data) => encode_struct_body(&data.fields),
        Data::Enum(data) => encode_enum_body(data)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "unions cannot derive `Encode`",
            ))
        }
    };

    let bounded = bounded_generics(
        &input.generics,
        parse_quote!(::binform::__internal::Encode),
    );
    let (impl_generics, _, where_clause) = bounded.split_for_impl();
    let (_, ty_generics, _) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::binform::__internal::Encode
            for #name #ty_generics #where_clause
        {
            fn encode<
                __W: ::std::io::Write,
                __O: ::binform::__internal::ByteOrder,
            >(
                &self,
                __encoder: &mut ::binform::__internal::Encoder<__W, __O>,
            ) -> ::std::result::Result<(), ::binform::__internal::Error> {
                #body
            }
        }
    })
}

fn expand_decode(
    input: &DeriveInput,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name = &input.ident;

    let body = match &input.data {
        Data::Struct(data) => decode_struct_body(&data.fields),
        Data::Enum(data) => decode_enum_body(name, data)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "unions cannot derive `Decode`",
            ))
        }
    };

    let bounded = bounded_generics(
        &input.generics,
        parse_quote!(::binform::__internal::Decode),
    );
    let (impl_generics, _, where_clause) = bounded.split_for_impl();
    let (_, ty_generics, _) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::binform::__internal::Decode
            for #name #ty_generics #where_clause
        {
            fn decode<
                __R: ::std::io::Read,
                __O: ::binform::__internal::ByteOrder,
            >(
                __decoder: &mut ::binform::__internal::Decoder<__R, __O>,
            ) -> ::std::result::Result<Self, ::binform::__internal::Error> {
                #body
            }
        }
    })
}

/// Clones `generics` with `bound` added to every type parameter, so that a
/// derived impl is available exactly when all field types support the
/// operation.
fn bounded_generics(
    generics: &Generics,
    bound: syn::TypeParamBound,
) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(bound.clone());
    }
    generics
}

fn encode_struct_body(fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(fields) => {
            let writes = fields.named.iter().map(|field| {
                let ident = field.ident.as_ref().unwrap();
                quote! {
                    ::binform::__internal::Encode::encode(
                        &self.#ident,
                        __encoder,
                    )?;
                }
            });

            quote! {
                #(#writes)*
                Ok(())
            }
        }
        Fields::Unnamed(fields) => {
            let writes =
                fields.unnamed.iter().enumerate().map(|(position, _)| {
                    let index = Index::from(position);
                    quote! {
                        ::binform::__internal::Encode::encode(
                            &self.#index,
                            __encoder,
                        )?;
                    }
                });

            quote! {
                #(#writes)*
                Ok(())
            }
        }
        Fields::Unit => quote! { Ok(()) },
    }
}

fn decode_struct_body(fields: &Fields) -> proc_macro2::TokenStream {
    match fields {
        Fields::Named(fields) => {
            let reads = fields.named.iter().map(|field| {
                let ident = field.ident.as_ref().unwrap();
                quote! {
                    #ident: ::binform::__internal::Decode::decode(__decoder)?,
                }
            });

            quote! {
                Ok(Self {
                    #(#reads)*
                })
            }
        }
        Fields::Unnamed(fields) => {
            let reads = fields.unnamed.iter().map(|_| {
                quote! {
                    ::binform::__internal::Decode::decode(__decoder)?,
                }
            });

            quote! {
                Ok(Self(
                    #(#reads)*
                ))
            }
        }
        Fields::Unit => quote! { Ok(Self) },
    }
}

fn encode_enum_body(
    data: &DataEnum,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    if data.variants.is_empty() {
        return Ok(quote! { match *self {} });
    }

    let arms = data
        .variants
        .iter()
        .enumerate()
        .map(|(position, variant)| {
            let variant_name = &variant.ident;
            let index = variant_index(variant_name, position)?;

            let arm = match &variant.fields {
                Fields::Unit => quote! {
                    Self::#variant_name => __encoder.emit_u32(#index),
                },
                Fields::Unnamed(fields) => {
                    let bindings: Vec<_> = (0..fields.unnamed.len())
                        .map(|position| {
                            Ident::new(
                                &format!("__field_{position}"),
                                variant_name.span(),
                            )
                        })
                        .collect();
                    let writes = bindings.iter().map(|binding| {
                        quote! {
                            ::binform::__internal::Encode::encode(
                                #binding,
                                __encoder,
                            )?;
                        }
                    });

                    quote! {
                        Self::#variant_name(#(#bindings),*) => {
                            __encoder.emit_u32(#index)?;
                            #(#writes)*
                            Ok(())
                        }
                    }
                }
                Fields::Named(fields) => {
                    let bindings: Vec<_> = fields
                        .named
                        .iter()
                        .map(|field| field.ident.as_ref().unwrap())
                        .collect();
                    let writes = bindings.iter().map(|binding| {
                        quote! {
                            ::binform::__internal::Encode::encode(
                                #binding,
                                __encoder,
                            )?;
                        }
                    });

                    quote! {
                        Self::#variant_name { #(#bindings),* } => {
                            __encoder.emit_u32(#index)?;
                            #(#writes)*
                            Ok(())
                        }
                    }
                }
            };

            Ok(arm)
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}

fn decode_enum_body(
    name: &Ident,
    data: &DataEnum,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let name_str = name.to_string();

    let arms = data
        .variants
        .iter()
        .enumerate()
        .map(|(position, variant)| {
            let variant_name = &variant.ident;
            let index = variant_index(variant_name, position)?;

            let arm = match &variant.fields {
                Fields::Unit => quote! {
                    #index => Ok(Self::#variant_name),
                },
                Fields::Unnamed(fields) => {
                    let reads = fields.unnamed.iter().map(|_| {
                        quote! {
                            ::binform::__internal::Decode::decode(__decoder)?,
                        }
                    });

                    quote! {
                        #index => Ok(Self::#variant_name(
                            #(#reads)*
                        )),
                    }
                }
                Fields::Named(fields) => {
                    let reads = fields.named.iter().map(|field| {
                        let ident = field.ident.as_ref().unwrap();
                        quote! {
                            #ident: ::binform::__internal::Decode::decode(
                                __decoder,
                            )?,
                        }
                    });

                    quote! {
                        #index => Ok(Self::#variant_name {
                            #(#reads)*
                        }),
                    }
                }
            };

            Ok(arm)
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    Ok(quote! {
        match __decoder.expect_u32()? {
            #(#arms)*
            __index => {
                Err(::binform::__internal::Error::UnknownVariant {
                    type_name: #name_str,
                    index: __index,
                })
            }
        }
    })
}

fn variant_index(
    variant_name: &Ident,
    position: usize,
) -> Result<u32, syn::Error> {
    u32::try_from(position).map_err(|_| {
        syn::Error::new_spanned(
            variant_name,
            "enum has too many variants to serialize",
        )
    })
}
