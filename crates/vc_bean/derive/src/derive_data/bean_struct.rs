use std::collections::BTreeSet;

use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Field, Fields, Generics, Ident, ImplGenerics, Path, TypeGenerics};

use super::{FieldAttributes, PropertyAttribute, TypeAttributes};

// -----------------------------------------------------------------------------
// BeanField

pub(crate) struct BeanField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
}

impl BeanField<'_> {
    pub fn ident(&self) -> &Ident {
        // `BeanStruct::from_input` only accepts named fields.
        self.data.ident.as_ref().expect("named field")
    }

    /// The member name: the field name unless renamed.
    pub fn name(&self) -> String {
        match &self.attrs.rename {
            Some(rename) => rename.value(),
            None => self.ident().to_string(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.attrs.skip.is_none()
    }

    /// `pub` fields are public unless marked `private`.
    pub fn is_public(&self) -> bool {
        self.attrs.private.is_none() && matches!(self.data.vis, syn::Visibility::Public(_))
    }
}

// -----------------------------------------------------------------------------
// BeanStruct

pub(crate) struct BeanStruct<'a> {
    vc_bean_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
    fields: Vec<BeanField<'a>>,
}

impl<'a> BeanStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`Bean` can only be derived for structs",
            ));
        };
        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new_spanned(
                &data.fields,
                "`Bean` requires named fields",
            ));
        };

        let mut attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let fields = named
            .named
            .iter()
            .map(|data| {
                Ok(BeanField {
                    data,
                    attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        let mut names = BTreeSet::new();
        for field in fields.iter().filter(|field| field.is_active()) {
            if !names.insert(field.name()) {
                return Err(syn::Error::new_spanned(field.data, "duplicate member name"));
            }
        }
        for property in &attrs.properties {
            if !names.insert(property.name.value()) {
                return Err(syn::Error::new_spanned(&property.name, "duplicate member name"));
            }
        }

        let vc_bean_path = attrs.crate_path.take().unwrap_or_else(crate::path::vc_bean);

        Ok(Self {
            vc_bean_path,
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            fields,
        })
    }

    #[inline]
    pub fn vc_bean_path(&self) -> &Path {
        &self.vc_bean_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn fields(&self) -> &[BeanField<'a>] {
        &self.fields
    }

    /// Fields that are members, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &BeanField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }

    #[inline]
    pub fn properties(&self) -> &[PropertyAttribute] {
        &self.attrs.properties
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Returns `impl_generics`, `ty_generics` and a where clause.
    ///
    /// With type parameters, `Self` must be `Any + Send + Sync` and every
    /// member type that mentions a parameter must be `Reflect + Typed`.
    /// With lifetimes only, `Self` must be `'static`.
    pub fn split_generics(&self) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let mut where_tokens = quote! { where };

        if self.is_generic() {
            where_tokens.extend(quote! { Self: #AnyFP + #SendFP + #SyncFP, });
        } else if self.generics.lifetimes().next().is_some() {
            where_tokens.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            where_tokens.extend(quote! { #(#predicates,)* });
        }

        let params = self
            .generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect::<Vec<Ident>>();

        if !params.is_empty() {
            let reflect_ = crate::path::reflect_(&self.vc_bean_path);
            let typed_ = crate::path::typed_(&self.vc_bean_path);

            // Deduplicate by token text so that repeated types add one bound.
            let mut seen = BTreeSet::new();
            let member_types = self
                .active_fields()
                .map(|field| &field.data.ty)
                .chain(self.properties().iter().map(|property| &property.ty));

            for ty in member_types {
                let tokens = ty.to_token_stream();
                if mentions_any(&params, tokens.clone()) && seen.insert(tokens.to_string()) {
                    where_tokens.extend(quote! { #ty: #reflect_ + #typed_, });
                }
            }
        }

        (impl_generics, ty_generics, where_tokens)
    }
}

/// Does any of `idents` appear in `tokens`?
fn mentions_any(idents: &[Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => idents.contains(&ident),
        TokenTree::Group(group) => mentions_any(idents, group.stream()),
        _ => false,
    })
}
