use crate::util::option_inner;
use darling::{Error as DarlingError, FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type, ext::IdentExt};

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let record = match RecordInput::from_derive_input(&input) {
        Ok(record) => record,
        Err(err) => return err.write_errors(),
    };

    record.expand().unwrap_or_else(DarlingError::write_errors)
}

///
/// RecordInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(scan), supports(struct_named))]
struct RecordInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, RecordField>,
}

///
/// RecordField
///

#[derive(FromField)]
#[darling(attributes(scan))]
struct RecordField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    embed: bool,

    #[darling(default)]
    flatten: bool,
}

///
/// FieldShape
///

enum FieldShape<'a> {
    Required,
    Optional,
    Embedded {
        inner: &'a Type,
        optional: bool,
        flatten: bool,
    },
}

impl RecordField {
    fn shape(&self) -> FieldShape<'_> {
        let inner = option_inner(&self.ty);

        if self.embed || self.flatten {
            FieldShape::Embedded {
                inner: inner.unwrap_or(&self.ty),
                optional: inner.is_some(),
                flatten: self.flatten,
            }
        } else if inner.is_some() {
            FieldShape::Optional
        } else {
            FieldShape::Required
        }
    }

    fn validate(&self, ident: &Ident) -> Result<(), DarlingError> {
        if self.skip && (self.embed || self.flatten || self.rename.is_some()) {
            return Err(
                DarlingError::custom("`skip` cannot be combined with other scan options")
                    .with_span(ident),
            );
        }

        if self.embed && self.flatten {
            return Err(
                DarlingError::custom("`flatten` already embeds; use `embed` or `flatten`, not both")
                    .with_span(ident),
            );
        }

        if self.rename.as_deref().is_some_and(str::is_empty) {
            return Err(DarlingError::custom("`rename` must not be empty").with_span(ident));
        }

        Ok(())
    }

    // Entry in the static `RecordModel::fields` slice.
    fn model_expr(&self, ident: &Ident) -> TokenStream {
        let name = ident.unraw().to_string();
        let column = match &self.rename {
            Some(column) => quote!(::core::option::Option::Some(#column)),
            None => quote!(::core::option::Option::None),
        };
        let kind = match self.shape() {
            FieldShape::Required => quote!(::rowscan::model::FieldKind::Required),
            FieldShape::Optional => quote!(::rowscan::model::FieldKind::Optional),
            FieldShape::Embedded {
                inner,
                optional,
                flatten,
            } => quote! {
                ::rowscan::model::FieldKind::Embedded(::rowscan::model::EmbeddedModel {
                    model: <#inner as ::rowscan::traits::Record>::MODEL,
                    optional: #optional,
                    flatten: #flatten,
                })
            },
        };

        quote! {
            ::rowscan::model::FieldModel {
                ident: #name,
                column: #column,
                kind: #kind,
            }
        }
    }

    // Entry in the `fields_mut` vector; `ident` is bound by the destructuring pattern.
    fn field_mut_expr(&self, ident: &Ident) -> TokenStream {
        match self.shape() {
            FieldShape::Required | FieldShape::Optional => {
                quote!(::rowscan::traits::FieldMut::Value(#ident))
            }
            FieldShape::Embedded {
                optional: false, ..
            } => quote!(::rowscan::traits::FieldMut::Record(#ident)),
            FieldShape::Embedded { optional: true, .. } => {
                quote!(::rowscan::traits::FieldMut::OptionalRecord(#ident))
            }
        }
    }
}

impl RecordInput {
    fn expand(&self) -> Result<TokenStream, DarlingError> {
        let ident = &self.ident;
        let name = ident.unraw().to_string();
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let Some(fields) = self.data.as_ref().take_struct() else {
            return Err(DarlingError::custom(
                "Record can only be derived for structs with named fields",
            )
            .with_span(ident));
        };

        let mut errors = Vec::new();
        let mut scanned = Vec::new();
        for field in fields.fields {
            let Some(field_ident) = field.ident.as_ref() else {
                errors.push(DarlingError::custom("Record fields must be named").with_span(ident));
                continue;
            };
            if let Err(err) = field.validate(field_ident) {
                errors.push(err);
                continue;
            }
            if !field.skip {
                scanned.push((field_ident, field));
            }
        }
        if !errors.is_empty() {
            return Err(DarlingError::multiple(errors));
        }

        let bindings = scanned.iter().map(|(field_ident, _)| field_ident);
        let field_models = scanned
            .iter()
            .map(|(field_ident, field)| field.model_expr(field_ident));
        let field_muts = scanned
            .iter()
            .map(|(field_ident, field)| field.field_mut_expr(field_ident));

        Ok(quote! {
            impl #impl_generics ::rowscan::traits::RecordFields for #ident #ty_generics #where_clause {
                fn fields_mut(&mut self) -> ::std::vec::Vec<::rowscan::traits::FieldMut<'_>> {
                    let Self { #(#bindings,)* .. } = self;

                    ::std::vec![#(#field_muts),*]
                }
            }

            impl #impl_generics ::rowscan::traits::Record for #ident #ty_generics #where_clause {
                const MODEL: &'static ::rowscan::model::RecordModel = &::rowscan::model::RecordModel {
                    path: ::core::concat!(::core::module_path!(), "::", #name),
                    fields: &[#(#field_models),*],
                };
            }

            impl #impl_generics ::rowscan::traits::ScanElement for #ident #ty_generics #where_clause {
                type Record = Self;

                fn from_record(record: Self) -> Self {
                    record
                }
            }

            impl #impl_generics ::rowscan::traits::ScanElement
                for ::std::boxed::Box<#ident #ty_generics> #where_clause
            {
                type Record = #ident #ty_generics;

                fn from_record(record: Self::Record) -> Self {
                    ::std::boxed::Box::new(record)
                }
            }
        })
    }
}
