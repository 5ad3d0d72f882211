use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use crate::derive_data::BeanStruct;

/// Generate implementation code for `Record`.
///
/// Every member field, raw or not, is a backing field. Virtual properties
/// are not.
pub(crate) fn impl_trait_record(info: &BeanStruct) -> TokenStream {
    use crate::path::fp::OptionFP;

    let vc_bean_path = info.vc_bean_path();
    let record_ = crate::path::record_(vc_bean_path);
    let reflect_ = crate::path::reflect_(vc_bean_path);
    let option_ = OptionFP.to_token_stream();

    let idents = info.active_fields().map(|field| field.ident()).collect::<Vec<_>>();
    let names = info.active_fields().map(|field| field.name()).collect::<Vec<_>>();
    let indices = 0..names.len();
    let field_count = names.len();

    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #record_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #OptionFP<&dyn #reflect_> {
                match name {
                    #(#names => #option_::Some(&self.#idents),)*
                    _ => #OptionFP::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #OptionFP<&mut dyn #reflect_> {
                match name {
                    #(#names => #option_::Some(&mut self.#idents),)*
                    _ => #OptionFP::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            fn name_at(&self, index: usize) -> #OptionFP<&str> {
                match index {
                    #(#indices => #option_::Some(#names),)*
                    _ => #OptionFP::None,
                }
            }
        }
    }
}
