use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, LitByteStr, Token};

struct CategoryArm {
    name: Ident,
    bytes: LitByteStr,
}

impl Parse for CategoryArm {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse::<Ident>()?;
        input.parse::<Token![=>]>()?;
        let bytes = input.parse::<LitByteStr>()?;
        Ok(Self { name, bytes })
    }
}

struct ByteLookupTableInput {
    table_name: Ident,
    enum_name: Ident,
    arms: Vec<CategoryArm>,
}

impl Parse for ByteLookupTableInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            panic!("A table name and an enum name must be given for a byte lookup table");
        }

        let table_name = input.parse::<Ident>()?;
        input.parse::<Token![,]>()?;
        let enum_name = input.parse::<Ident>()?;
        input.parse::<Token![,]>()?;
        let arms = Punctuated::<CategoryArm, Token![,]>::parse_terminated(input)?
            .into_iter()
            .collect();

        Ok(ByteLookupTableInput {
            table_name,
            enum_name,
            arms,
        })
    }
}

pub fn generate_byte_lookup_table_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ByteLookupTableInput);

    // Each category is a distinct bit so that categories cannot overlap and
    // the `UNICODE` sentinel always lands above the user-defined ones.
    let values = &mut [0u8; 256];
    let mut enum_fields = vec![Ident::new("PLAIN", proc_macro2::Span::mixed_site())];
    let mut enum_values: Vec<u8> = vec![0];
    let mut category_value: u16 = 1;
    for CategoryArm { name, bytes } in input.arms {
        let name_span = name.span();
        if category_value > 64 {
            return TokenStream::from(
                syn::Error::new(name_span, "a byte lookup table supports at most 7 categories")
                    .to_compile_error(),
            );
        }
        enum_fields.push(name);
        enum_values.push(category_value as u8);
        for byte in bytes.value() {
            if values[byte as usize] != 0 {
                let char_value = char::from(byte);
                return TokenStream::from(
                    syn::Error::new(
                        name_span,
                        format!(
                            "byte '{char_value}' ({byte}) was given for two different categories"
                        ),
                    )
                    .to_compile_error(),
                );
            }
            values[byte as usize] = category_value as u8;
        }
        category_value *= 2;
    }
    enum_fields.push(Ident::new("UNICODE", proc_macro2::Span::mixed_site()));
    enum_values.push(category_value as u8);
    for byte in 128u8..=255 {
        values[byte as usize] = category_value as u8;
    }

    let table_name = input.table_name;
    let enum_name = input.enum_name;
    let predicate_names = enum_fields
        .iter()
        .map(|field| format_ident!("is_{}", field.to_string().to_lowercase()))
        .collect::<Vec<_>>();

    let expanded = quote! {
        pub(crate) static #table_name: [u8; 256] = [#(#values),*];

        #[repr(u8)]
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub(crate) enum #enum_name {
            #(#enum_fields = #enum_values),*
        }

        impl #enum_name {
            #[inline(always)]
            pub(crate) fn of(byte: u8) -> Self {
                match #table_name[byte as usize] {
                    #(#enum_values => #enum_name::#enum_fields,)*
                    value => unreachable!("invalid byte category value: {value}"),
                }
            }

            #(
                #[inline(always)]
                #[allow(unused)]
                pub(crate) fn #predicate_names(byte: u8) -> bool {
                    #table_name[byte as usize] == #enum_values
                }
            )*
        }
    };

    TokenStream::from(expanded)
}
