use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::BeanStruct;

/// Generate implementation code for `Reflect`.
pub(crate) fn impl_trait_reflect(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();
    let reflect_ = crate::path::reflect_(vc_bean_path);
    let reflect_clone_tokens = get_clone_impl(info);

    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #vc_bean_path::impl_reflect_cast_fn!(Record);

            #reflect_clone_tokens
        }
    }
}

// Generate `Reflect::reflect_clone` tokens.
//
// With `clone` the whole value is cloned, otherwise each member field is
// cloned through its own `reflect_clone` and skipped fields are defaulted.
fn get_clone_impl(info: &BeanStruct) -> TokenStream {
    use crate::path::fp::{BoxFP, CloneFP, DefaultFP, ResultFP};

    let vc_bean_path = info.vc_bean_path();
    let reflect_ = crate::path::reflect_(vc_bean_path);
    let typed_ = crate::path::typed_(vc_bean_path);
    let reflect_clone_error_ = crate::path::reflect_clone_error_(vc_bean_path);
    let exports_ = crate::path::macro_exports_(vc_bean_path);

    if let Some(span) = info.attrs().clone {
        return quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> #ResultFP<#BoxFP<dyn #reflect_>, #reflect_clone_error_> {
                #ResultFP::Ok(#BoxFP::new(<Self as #CloneFP>::clone(self)))
            }
        };
    }

    let fields = info.fields().iter().map(|field| {
        let ident = field.ident();
        if field.is_active() {
            let name = field.name();
            quote! {
                #ident: #exports_::clone_value(&self.#ident).map_err(|_| {
                    #reflect_clone_error_::FieldNotCloneable {
                        type_path: <Self as #typed_>::type_info().type_path(),
                        field: #name,
                    }
                })?,
            }
        } else {
            quote! {
                #ident: #DefaultFP::default(),
            }
        }
    });

    quote! {
        fn reflect_clone(&self) -> #ResultFP<#BoxFP<dyn #reflect_>, #reflect_clone_error_> {
            #ResultFP::Ok(#BoxFP::new(Self {
                #(#fields)*
            }))
        }
    }
}
