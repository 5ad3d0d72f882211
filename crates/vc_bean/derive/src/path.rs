//! Paths into the bean crate used by generated code.
//!
//! Keeping them here limits the changes when the bean crate is reorganized.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `vc_bean` crate, as seen from the caller.
///
/// 1. For crates that depend on `vc_bean`, `::vc_bean` is returned.
/// 2. For crates that depend on the `vc_beans` facade, `::vc_beans::bean`.
/// 3. Otherwise `::vc_bean`, which `vc_bean` itself resolves through
///    `extern crate self`.
///
/// This reads the caller's manifest, so it is called once per derive.
pub(crate) fn vc_bean() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.crate_path("vc_bean"))
}

// -----------------------------------------------------------------------------
// Fully qualified std items

/// Fully qualified paths of prelude items, immune to shadowing at the
/// derive site.
pub(crate) mod fp {
    use super::*;

    macro_rules! define_fp {
        ($($name:ident => ($($path:tt)*);)*) => {
            $(
                pub(crate) struct $name;

                impl ToTokens for $name {
                    fn to_tokens(&self, tokens: &mut TokenStream) {
                        tokens.extend(quote!($($path)*));
                    }
                }
            )*
        };
    }

    define_fp! {
        AnyFP => (::core::any::Any);
        SendFP => (::core::marker::Send);
        SyncFP => (::core::marker::Sync);
        CloneFP => (::core::clone::Clone);
        DefaultFP => (::core::default::Default);
        OptionFP => (::core::option::Option);
        ResultFP => (::core::result::Result);
        BoxFP => (::std::boxed::Box);
    }
}

// -----------------------------------------------------------------------------
// Bean items

#[inline(always)]
pub(crate) fn reflect_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::Reflect)
}

#[inline(always)]
pub(crate) fn typed_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::Typed)
}

#[inline(always)]
pub(crate) fn type_info_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::TypeInfo)
}

#[inline(always)]
pub(crate) fn record_info_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::RecordInfo)
}

#[inline(always)]
pub(crate) fn member_info_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::MemberInfo)
}

#[inline(always)]
pub(crate) fn visibility_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::Visibility)
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::NonGenericTypeInfoCell)
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::info::GenericTypeInfoCell)
}

#[inline(always)]
pub(crate) fn record_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::ops::Record)
}

#[inline(always)]
pub(crate) fn reflect_clone_error_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::ops::ReflectCloneError)
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_bean_path: &syn::Path) -> TokenStream {
    quote!(#vc_bean_path::__macro_exports)
}
