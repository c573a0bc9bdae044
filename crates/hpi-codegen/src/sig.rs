//! Native signature fragments shared by the generators.
//!
//! Everything here is pure string assembly over the marshalling table;
//! keeping it in one place is what makes parameter order identical across
//! prototypes, entry points, and dispatch thunks.

use hpi_core::{ParamDecl, TypeTag};

/// Return-type prefix, including the separating space.
pub(crate) fn ret_prefix(ret: Option<TypeTag>) -> String {
    match ret {
        None => "void ".to_string(),
        Some(TypeTag::Str) => "const char *".to_string(),
        Some(tag) => format!("{} ", tag.c_type()),
    }
}

/// Declared parameter list; `void` when empty.
pub(crate) fn param_list(params: &[ParamDecl]) -> String {
    if params.is_empty() {
        "void".to_string()
    } else {
        params
            .iter()
            .map(|p| p.tag.c_param(&p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parameter list with the implicit leading scope-handle ID.
pub(crate) fn param_list_with_id(params: &[ParamDecl]) -> String {
    if params.is_empty() {
        "int id".to_string()
    } else {
        format!("int id, {}", param_list(params))
    }
}

/// Positional argument list for forwarding a native call.
pub(crate) fn arg_list(params: &[ParamDecl]) -> String {
    params
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `PyArg_ParseTuple` format string for the declared parameters.
pub(crate) fn parse_format(params: &[ParamDecl]) -> String {
    params.iter().map(|p| p.tag.parse_code()).collect()
}

/// Marshalled argument sequence for a varargs object call, ending in the
/// `0` sentinel: `PyLong_FromLong(x), PyUnicode_FromString(s), 0`.
pub(crate) fn py_arg_list(params: &[ParamDecl]) -> String {
    let mut out = String::new();
    for p in params {
        out.push_str(&p.tag.to_py(&p.name));
        out.push_str(", ");
    }
    out.push('0');
    out
}

/// Neutral return statement for a native signature.
pub(crate) fn neutral_return(ret: Option<TypeTag>) -> &'static str {
    if ret.is_some() { "return 0;" } else { "return;" }
}
