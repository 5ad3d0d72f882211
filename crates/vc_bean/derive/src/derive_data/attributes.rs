//! Parsing of `#[bean(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path, Type};

use crate::BEAN_ATTRIBUTE_NAME;

fn parse_bean_attrs(
    attrs: &[Attribute],
    mut f: impl FnMut(ParseNestedMeta<'_>) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut f)?;
        }
    }
    Ok(())
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// A virtual member declared with `#[bean(property(...))]`.
pub(crate) struct PropertyAttribute {
    pub name: LitStr,
    pub ty: Type,
    pub get: Option<Path>,
    pub set: Option<Path>,
    pub private: bool,
}

impl PropertyAttribute {
    fn parse(meta: &ParseNestedMeta<'_>) -> syn::Result<Self> {
        let mut name = None;
        let mut ty = None;
        let mut get = None;
        let mut set = None;
        let mut private = false;

        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("name") {
                set_once(&mut name, nested.value()?.parse::<LitStr>()?, &nested)
            } else if nested.path.is_ident("ty") {
                set_once(&mut ty, nested.value()?.parse::<Type>()?, &nested)
            } else if nested.path.is_ident("get") {
                set_once(&mut get, nested.value()?.parse::<Path>()?, &nested)
            } else if nested.path.is_ident("set") {
                set_once(&mut set, nested.value()?.parse::<Path>()?, &nested)
            } else if nested.path.is_ident("private") {
                private = true;
                Ok(())
            } else {
                Err(nested.error("expected `name`, `ty`, `get`, `set` or `private`"))
            }
        })?;

        let Some(name) = name else {
            return Err(meta.error("property requires `name = \"...\"`"));
        };
        let Some(ty) = ty else {
            return Err(meta.error("property requires `ty = Type`"));
        };
        if get.is_none() && set.is_none() {
            return Err(meta.error("property requires `get` or `set`"));
        }

        Ok(Self {
            name,
            ty,
            get,
            set,
            private,
        })
    }
}

/// Attributes placed on the struct.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[bean(default)]`: the type implements `Default`.
    pub default: Option<Span>,
    /// `#[bean(clone)]`: the type implements `Clone`.
    pub clone: Option<Span>,
    /// `#[bean(crate = "...")]`
    pub crate_path: Option<Path>,
    pub properties: Vec<PropertyAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        parse_bean_attrs(attrs, |meta| {
            if meta.path.is_ident("default") {
                set_once(&mut this.default, meta.path.span(), &meta)
            } else if meta.path.is_ident("clone") {
                set_once(&mut this.clone, meta.path.span(), &meta)
            } else if meta.path.is_ident("crate") {
                let path = meta.value()?.parse::<LitStr>()?.parse::<Path>()?;
                set_once(&mut this.crate_path, path, &meta)
            } else if meta.path.is_ident("property") {
                this.properties.push(PropertyAttribute::parse(&meta)?);
                Ok(())
            } else {
                Err(meta.error("expected `default`, `clone`, `crate` or `property(...)`"))
            }
        })?;

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub skip: Option<Span>,
    pub raw: Option<Span>,
    pub get: Option<Path>,
    pub set: Option<Path>,
    pub private: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        parse_bean_attrs(attrs, |meta| {
            if meta.path.is_ident("rename") {
                set_once(&mut this.rename, meta.value()?.parse::<LitStr>()?, &meta)
            } else if meta.path.is_ident("skip") {
                set_once(&mut this.skip, meta.path.span(), &meta)
            } else if meta.path.is_ident("raw") {
                set_once(&mut this.raw, meta.path.span(), &meta)
            } else if meta.path.is_ident("get") {
                set_once(&mut this.get, meta.value()?.parse::<Path>()?, &meta)
            } else if meta.path.is_ident("set") {
                set_once(&mut this.set, meta.value()?.parse::<Path>()?, &meta)
            } else if meta.path.is_ident("private") {
                set_once(&mut this.private, meta.path.span(), &meta)
            } else {
                Err(meta.error("expected `rename`, `skip`, `raw`, `get`, `set` or `private`"))
            }
        })?;

        if let Some(span) = this.skip
            && (this.rename.is_some() || this.raw.is_some() || this.get.is_some() || this.set.is_some())
        {
            return Err(syn::Error::new(span, "`skip` cannot be combined with other attributes"));
        }

        Ok(this)
    }
}
