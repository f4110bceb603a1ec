use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let kind = name.to_string();

    let (index, prefix) = extract_struct_args(input)?;
    let index = format_ident!("{}", index);
    let key_fields = extract_key_fields(input)?;

    let expanded = quote! {
        impl ::budget_ledger::Record for #name {
            const INDEX: ::budget_ledger::IndexName = ::budget_ledger::IndexName::#index;
            const KEY_PREFIX: &'static str = #prefix;
            const KIND: &'static str = #kind;

            fn key(&self) -> ::std::string::String {
                <Self as ::budget_ledger::Record>::key_for(&[
                    #( ::core::convert::AsRef::<str>::as_ref(&self.#key_fields) ),*
                ])
            }
        }
    };

    Ok(expanded)
}

fn extract_struct_args(input: &DeriveInput) -> syn::Result<(String, String)> {
    let mut index = None;
    let mut prefix = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("index") {
                let value: LitStr = meta.value()?.parse()?;
                index = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("prefix") {
                let value: LitStr = meta.value()?.parse()?;
                prefix = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `index` or `prefix`"))
            }
        })?;
    }

    // Default: struct name + "s" (Thing -> Things)
    let index = index.unwrap_or_else(|| format!("{}s", input.ident));
    Ok((index, prefix.unwrap_or_default()))
}

fn extract_key_fields(input: &DeriveInput) -> syn::Result<Vec<Ident>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record derive: only structs with named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive: only structs are supported",
            ))
        }
    };

    let mut keys = Vec::new();
    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            let mut is_key = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    is_key = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `key`"))
                }
            })?;
            if is_key {
                if let Some(ident) = &field.ident {
                    keys.push(ident.clone());
                }
            }
        }
    }

    if keys.is_empty() {
        // Default: a field named "id"
        if let Some(ident) = fields
            .iter()
            .filter_map(|f| f.ident.as_ref())
            .find(|ident| *ident == "id")
        {
            keys.push(ident.clone());
        }
    }

    if keys.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record derive: no field marked with #[record(key)] and no field named `id`",
        ));
    }

    Ok(keys)
}
