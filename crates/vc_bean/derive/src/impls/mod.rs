// -----------------------------------------------------------------------------
// Modules

mod trait_record;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use trait_record::impl_trait_record;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;

use crate::derive_data::BeanStruct;

/// Implements `Typed`, `Reflect` and `Record` for a bean.
pub(crate) fn impl_bean(info: &BeanStruct) -> TokenStream {
    let typed_trait_tokens = impl_trait_typed(info);
    let reflect_trait_tokens = impl_trait_reflect(info);
    let record_trait_tokens = impl_trait_record(info);

    quote! {
        const _: () = {
            #typed_trait_tokens

            #reflect_trait_tokens

            #record_trait_tokens
        };
    }
}
