//! Procedural macros for the microunit framework
//!
//! This crate provides the `#[def_case]` attribute macro, which turns an
//! inherent `impl` block into a `microunit::TestCase` implementation.
//! Methods are collected at compile time; nothing is looked up by name at
//! run time.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, ImplItem, ImplItemFn, ItemImpl, ReturnType, Token, Type, parse_macro_input,
};

const TEST_PREFIX: &str = "test";

/// Marks an impl block as a test case.
///
/// # Example
///
/// ```rust,ignore
/// use microunit::{Assertions, UnitResult, def_case};
///
/// #[derive(Default)]
/// struct Ring {
///     buf: Vec<u8>,
/// }
///
/// #[def_case]
/// impl Ring {
///     fn set_up(&mut self) {
///         self.buf = vec![1, 2, 3];
///     }
///
///     fn test_len(&mut self) -> UnitResult {
///         self.assert_equal(self.buf.len(), 3, "")
///     }
///
///     #[skip("needs DMA")]
///     fn test_dma(&mut self) {}
/// }
/// ```
///
/// Every method whose name starts with `test` becomes a test entry. Test
/// methods take `&self` or `&mut self` and either return nothing or a
/// `Result` whose error converts into `microunit::TestError`.
///
/// # Attributes
/// - `set_up` / `tear_down` methods become the fixture hooks
/// - `#[skip(reason)]` - Test is replaced by a skip
/// - `#[skip_unless(cond, reason)]` - Test runs only if `cond` holds
#[proc_macro_attribute]
pub fn def_case(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as ItemImpl);

    if !attr.is_empty() {
        let attr = TokenStream2::from(attr);
        return syn::Error::new_spanned(attr, "#[def_case] takes no arguments")
            .to_compile_error()
            .into();
    }

    match expand(&mut input) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[def_case] expects an inherent impl block",
        ));
    }

    let mut entries = Vec::new();
    let mut hooks = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let decorators = take_skip_attrs(&mut method.attrs)?;
        let name = method.sig.ident.to_string();

        if name.starts_with(TEST_PREFIX) {
            check_signature(method)?;
            entries.push(test_entry(method, &decorators));
        } else if let Some(attr) = decorators.first() {
            return Err(syn::Error::new_spanned(
                attr,
                "skip attributes only apply to `test*` methods",
            ));
        } else if name == "set_up" || name == "tear_down" {
            check_signature(method)?;
            hooks.push(hook(method));
        }
    }

    let self_ty = &input.self_ty;
    let type_name = type_name(self_ty);
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::microunit::TestCase for #self_ty #where_clause {
            fn name() -> &'static str {
                #type_name
            }

            fn module() -> &'static str {
                ::core::module_path!()
            }

            #(#hooks)*

            fn tests() -> ::std::vec::Vec<::microunit::TestMethod<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

/// A skip attribute removed from a method, kept for error spans.
struct SkipAttr {
    attr: Attribute,
    decorator: TokenStream2,
}

impl ToTokens for SkipAttr {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        self.attr.to_tokens(tokens);
    }
}

/// Remove `#[skip]` / `#[skip_unless]` from `attrs`, returning the wrappers.
fn take_skip_attrs(attrs: &mut Vec<Attribute>) -> syn::Result<Vec<SkipAttr>> {
    let mut found = Vec::new();
    let mut kept = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if attr.path().is_ident("skip") {
            let reason: Expr = attr.parse_args()?;
            found.push(SkipAttr {
                decorator: quote!(::microunit::skip(#reason)),
                attr,
            });
        } else if attr.path().is_ident("skip_unless") {
            let args = attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)?;
            if args.len() != 2 {
                return Err(syn::Error::new_spanned(
                    &attr,
                    "expected #[skip_unless(condition, reason)]",
                ));
            }
            let cond = &args[0];
            let reason = &args[1];
            found.push(SkipAttr {
                decorator: quote!(::microunit::skip_unless(#cond, #reason)),
                attr,
            });
        } else {
            kept.push(attr);
        }
    }

    *attrs = kept;
    Ok(found)
}

/// Test methods and hooks take only `&self` or `&mut self`.
fn check_signature(method: &ImplItemFn) -> syn::Result<()> {
    let sig = &method.sig;
    let by_ref = sig
        .receiver()
        .is_some_and(|receiver| receiver.reference.is_some());

    if !by_ref || sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "expected a method taking only `&self` or `&mut self`",
        ));
    }
    if !sig.generics.params.is_empty() || sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig,
            "test methods cannot be generic or async",
        ));
    }
    Ok(())
}

/// `Self::method(case)` adapted to `UnitResult`.
fn call(method: &ImplItemFn, receiver: TokenStream2) -> TokenStream2 {
    let ident = &method.sig.ident;
    match method.sig.output {
        ReturnType::Default => quote! {
            Self::#ident(#receiver);
            ::core::result::Result::Ok(())
        },
        ReturnType::Type(..) => quote! {
            ::core::result::Result::map_err(Self::#ident(#receiver), ::core::convert::Into::into)
        },
    }
}

fn test_entry(method: &ImplItemFn, decorators: &[SkipAttr]) -> TokenStream2 {
    let name = method.sig.ident.to_string();
    let body = call(method, quote!(case));
    let decorators = decorators.iter().map(|skip| &skip.decorator);

    quote! {
        ::microunit::TestMethod::new(#name, |case: &mut Self| -> ::microunit::UnitResult {
            #body
        })
        #(.decorate(#decorators))*
    }
}

fn hook(method: &ImplItemFn) -> TokenStream2 {
    let ident = &method.sig.ident;
    let body = call(method, quote!(self));

    quote! {
        fn #ident(&mut self) -> ::microunit::UnitResult {
            #body
        }
    }
}

/// Last path segment of the case type, e.g. `Ring` for `crate::drivers::Ring`.
fn type_name(ty: &Type) -> String {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        other => other.to_token_stream().to_string().replace(' ', ""),
    }
}
