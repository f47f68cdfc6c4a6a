use syn::{GenericArgument, PathArguments, Type};

/// True when the last path segment of `ty` is `ident` (`Option`, `std::option::Option`, ...).
pub fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}

/// Inner type of `Option<T>`, if `ty` is one.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    if !is_path_ident(ty, "Option") {
        return None;
    }
    let Type::Path(path) = ty else {
        return None;
    };
    let PathArguments::AngleBracketed(args) = &path.path.segments.last()?.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}
