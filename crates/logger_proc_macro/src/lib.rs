use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, FnArg, Ident, ItemFn, Pat};

#[derive(Eq, PartialEq)]
enum ProcLogLevel {
    Trace,
    Debug,
}

// #[log(trace)] or #[log(debug)]
//
// Logs entry and exit of the annotated function through `logger::default_logger()`.
// The entry's source location carries the function's path, file, line and column.
//
// #[log(trace)] logs the function arguments and return value when the console
// threshold is `trace`, and falls back to #[log(debug)] otherwise. It is only
// applicable to functions whose parameters and return type implement Debug.
//
// #[log(debug)] logs the function arguments and their types.

#[proc_macro_attribute]
pub fn log(attr: TokenStream, item: TokenStream) -> TokenStream {
    let level = match parse_level(attr) {
        Ok(level) => level,
        Err(err) => return err.to_compile_error().into(),
    };

    let input_fn: ItemFn = parse_macro_input!(item as ItemFn);
    let fn_name = &input_fn.sig.ident;
    let args = &input_fn.sig.inputs;
    let is_async = input_fn.sig.asyncness.is_some();
    let fn_block = &input_fn.block;

    let log_args_type = args.iter().filter_map(|arg| {
        if let FnArg::Typed(pat_type) = arg {
            if let Pat::Ident(ref pat_ident) = *pat_type.pat {
                let pat_ident = &pat_ident.ident;
                let pat_type = &pat_type.ty;
                Some(quote! { format!("{}: {}", stringify!(#pat_ident), stringify!(#pat_type)) })
            } else { None }
        } else { None }
    });

    let log_args_value = args.iter().filter_map(|arg| {
        if let FnArg::Typed(pat_type) = arg {
            if let Pat::Ident(ref pat_ident) = *pat_type.pat {
                let pat_ident = &pat_ident.ident;
                Some(quote! { format!("{}: {:?}", stringify!(#pat_ident), #pat_ident) })
            } else { None }
        } else { None }
    });

    // "a: u32, b: &str"
    let log_args_type = quote! {{
        let parts: Vec<String> = vec![#(#log_args_type),*];
        parts.join(", ")
    }};
    // "a: 1, b: \"x\""
    let log_args_value = quote! {{
        let parts: Vec<String> = vec![#(#log_args_value),*];
        parts.join(", ")
    }};

    let call_original_fn = if is_async {
        quote! { let __log_result = (async move { #fn_block }).await; }
    } else {
        quote! { let __log_result = (move || { #fn_block })(); }
    };

    let location = quote! {
        ::logger::SourceLocation::new(
            file!(),
            concat!(module_path!(), "::", stringify!(#fn_name)),
            line!(),
            column!(),
        )
    };

    let emit = |level: Ident, message: proc_macro2::TokenStream| quote! {
        ::logger::default_logger()
            .record(::logger::LogLevel::#level, #message)
            .location(#location)
            .emit();
    };

    let trace = Ident::new("Trace", Span::call_site());
    let debug = Ident::new("Debug", Span::call_site());

    let debug_enter = emit(debug.clone(), quote! { format!("Function call {}({})", stringify!(#fn_name), #log_args_type) });
    let debug_exit = emit(debug, quote! { format!("Function {} returned.", stringify!(#fn_name)) });

    let (log_enter, log_exit) = match level {
        ProcLogLevel::Trace => {
            let trace_enter = emit(trace.clone(), quote! { format!("Function call {}({})", stringify!(#fn_name), #log_args_value) });
            let trace_exit = emit(trace, quote! { format!("Function {} returned: {:?}", stringify!(#fn_name), __log_result) });
            (
                quote! {
                    if ::logger::console_threshold() == ::logger::LogLevel::Trace { #trace_enter }
                    else { #debug_enter }
                },
                quote! {
                    if ::logger::console_threshold() == ::logger::LogLevel::Trace { #trace_exit }
                    else { #debug_exit }
                },
            )
        }
        ProcLogLevel::Debug => (debug_enter, debug_exit),
    };

    let attributes = &input_fn.attrs;
    let visibility = &input_fn.vis;
    let signature = &input_fn.sig;

    let expanded = quote! {
        #(#attributes)* #visibility #signature {
            #log_enter
            #call_original_fn
            #log_exit
            return __log_result;
        }
    };

    TokenStream::from(expanded)
}

fn parse_level(attr: TokenStream) -> syn::Result<ProcLogLevel> {
    let ident: Ident = syn::parse(attr)?;
    match ident.to_string().to_lowercase().as_str() {
        "trace" => Ok(ProcLogLevel::Trace),
        "debug" => Ok(ProcLogLevel::Debug),
        _ => Err(syn::Error::new(ident.span(), "expected `trace` or `debug`")),
    }
}
