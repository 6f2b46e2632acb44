// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Procedural macros for the ctest framework.
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Error, Item, ItemFn, ReturnType, Type, parse_macro_input, spanned::Spanned};

/// Marks a function as a test and registers it with the ctest runner.
///
/// # Example
///
/// ```rust,ignore
/// use ctest::{def_test, expect_eq};
///
/// #[def_test]
/// fn test_addition() {
///     let a = 2 + 2;
///     expect_eq!(a, 4);
/// }
/// ```
///
/// The function takes no arguments. It may return nothing, in which case the
/// body is wrapped to return `TestResult::Ok` on completion, or it may return
/// `ctest::TestResult` itself.
#[proc_macro_attribute]
pub fn def_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as Item);
    let Item::Fn(input) = item else {
        return Error::new(item.span(), "expect a function to be declared as a test")
            .to_compile_error()
            .into();
    };
    expand_def_test(attr.into(), input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn returns_test_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "TestResult"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn check_signature(attr: &TokenStream2, input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;
    if !attr.is_empty() {
        return Err(Error::new(attr.span(), "expect an empty attribute: `#[def_test]`"));
    }
    if !sig.inputs.is_empty() {
        return Err(Error::new(
            sig.inputs.span(),
            "expect no input arguments for a test function",
        ));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(Error::new(
            sig.generics.span(),
            "a test function cannot be generic",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new(asyncness.span(), "a test function cannot be async"));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(Error::new(variadic.span(), "a test function cannot be variadic"));
    }
    if matches!(sig.output, ReturnType::Type(..)) && !returns_test_result(&sig.output) {
        return Err(Error::new(
            sig.output.span(),
            "expect no return value or `ctest::TestResult` for a test function",
        ));
    }
    Ok(())
}

/// Generate the test function and its registry entry.
fn expand_def_test(attr: TokenStream2, input: ItemFn) -> syn::Result<TokenStream2> {
    check_signature(&attr, &input)?;

    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_attrs = &input.attrs;
    let block = &input.block;

    let descriptor_name = format_ident!(
        "__CTEST_DESCRIPTOR_{}",
        fn_name.to_string().to_uppercase()
    );
    let fn_name_str = fn_name.to_string();

    // Early returns from assertion macros leave the trailing `Ok` unreachable.
    let test_fn = if returns_test_result(&input.sig.output) {
        quote! {
            #(#fn_attrs)*
            #fn_vis fn #fn_name() -> ::ctest::TestResult #block
        }
    } else {
        quote! {
            #(#fn_attrs)*
            #[allow(unreachable_code)]
            #fn_vis fn #fn_name() -> ::ctest::TestResult {
                let () = #block;
                ::ctest::TestResult::Ok
            }
        }
    };

    Ok(quote! {
        #test_fn

        #[::ctest::__private::distributed_slice(::ctest::CTESTS)]
        #[linkme(crate = ::ctest::__private::linkme)]
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        static #descriptor_name: ::ctest::TestCase = ::ctest::TestCase::new(
            #fn_name_str,
            ::core::module_path!(),
            ::core::file!(),
            ::core::line!(),
            ::core::column!(),
            #fn_name,
        );
    })
}
