// Información de la página anfitriona. Fuera del navegador no hay página.

/// `window.location.protocol` (`"https:"`, `"file:"`…)
#[cfg(target_arch = "wasm32")]
pub fn page_protocol() -> Option<String> {
    web_sys::window()?.location().protocol().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_protocol() -> Option<String> {
    None
}

/// Abierta como fichero local: `fetch` a la nube fallará por CORS
pub fn is_file_protocol(protocol: Option<&str>) -> bool {
    protocol == Some("file:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_protocol_detection() {
        assert!(is_file_protocol(Some("file:")));
        assert!(!is_file_protocol(Some("https:")));
        assert!(!is_file_protocol(None));
        assert_eq!(page_protocol(), None);
    }
}
