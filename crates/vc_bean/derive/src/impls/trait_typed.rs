use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{BeanField, BeanStruct, PropertyAttribute};

/// Generate implementation code for `Typed`.
///
/// The `RecordInfo` lists the fields in declaration order, then the
/// virtual properties.
pub(crate) fn impl_trait_typed(info: &BeanStruct) -> TokenStream {
    let vc_bean_path = info.vc_bean_path();
    let typed_ = crate::path::typed_(vc_bean_path);
    let type_info_ = crate::path::type_info_(vc_bean_path);
    let record_info_ = crate::path::record_info_(vc_bean_path);
    let member_info_ = crate::path::member_info_(vc_bean_path);

    let members = info
        .active_fields()
        .map(|field| field_member_tokens(info, field))
        .chain(info.properties().iter().map(|property| property_member_tokens(info, property)))
        .collect::<Vec<_>>();
    let member_count = members.len();

    let with_default = info
        .attrs()
        .default
        .map(|_| quote!(.with_default::<Self>()));

    let type_info_tokens = quote! {
        let __members: [#member_info_; #member_count] = [ #(#members,)* ];
        #type_info_::Record(
            #record_info_::new::<Self>(__members)
                #with_default
        )
    };

    let inner_cell_tokens = if info.is_generic() {
        let info_cell = crate::path::generic_type_info_cell_(vc_bean_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(vc_bean_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}

fn visibility_tokens(info: &BeanStruct, public: bool) -> TokenStream {
    let visibility_ = crate::path::visibility_(info.vc_bean_path());
    if public {
        quote!(#visibility_::Public)
    } else {
        quote!(#visibility_::Private)
    }
}

/// `.with_getter(..)` and `.with_setter(..)` calls wrapping user methods.
fn accessor_tokens(
    info: &BeanStruct,
    ty: &syn::Type,
    get: Option<&syn::Path>,
    set: Option<&syn::Path>,
    visibility: &TokenStream,
) -> TokenStream {
    let exports_ = crate::path::macro_exports_(info.vc_bean_path());

    let getter = get.map(|get| {
        quote! {
            .with_getter(
                |__this| #exports_::invoke_getter::<Self, #ty, _>(__this, #get),
                #visibility,
            )
        }
    });
    let setter = set.map(|set| {
        quote! {
            .with_setter(
                |__this, __value| #exports_::invoke_setter::<Self, #ty, _>(__this, __value, #set),
                #visibility,
            )
        }
    });

    quote!(#getter #setter)
}

fn field_member_tokens(info: &BeanStruct, field: &BeanField) -> TokenStream {
    let member_info_ = crate::path::member_info_(info.vc_bean_path());
    let ty = &field.data.ty;
    let name = field.name();
    let visibility = visibility_tokens(info, field.is_public());

    let constructor = if field.attrs.raw.is_some() {
        quote!(raw_field)
    } else {
        quote!(field)
    };
    let accessors = accessor_tokens(
        info,
        ty,
        field.attrs.get.as_ref(),
        field.attrs.set.as_ref(),
        &visibility,
    );

    quote! {
        #member_info_::#constructor::<#ty>(#name, #visibility)
            #accessors
    }
}

fn property_member_tokens(info: &BeanStruct, property: &PropertyAttribute) -> TokenStream {
    let member_info_ = crate::path::member_info_(info.vc_bean_path());
    let ty = &property.ty;
    let name = &property.name;
    let visibility = visibility_tokens(info, !property.private);

    let accessors = accessor_tokens(
        info,
        ty,
        property.get.as_ref(),
        property.set.as_ref(),
        &visibility,
    );

    quote! {
        #member_info_::property::<#ty>(#name)
            #accessors
    }
}
