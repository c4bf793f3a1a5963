use wgpu::{CompositeAlphaMode, TextureFormat};

/// Picks a surface format from those the adapter offers.
///
/// Falls back to the first offered format when none matches the preference.
pub(crate) fn choose_surface_format(formats: &[TextureFormat], prefer_srgb: bool) -> Option<TextureFormat> {
    let first = *formats.first()?;

    let preferred = if prefer_srgb {
        [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb]
            .into_iter()
            .find(|f| formats.contains(f))
    } else {
        formats.iter().copied().find(|f| !f.is_srgb())
    };

    Some(preferred.unwrap_or(first))
}

pub(crate) fn choose_alpha_mode(
    modes: &[CompositeAlphaMode],
    requested: Option<CompositeAlphaMode>,
) -> CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_preferred_when_offered() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn linear_preferred_when_srgb_not_wanted() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Rgba16Float));
        let srgb_only = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&srgb_only, false), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let modes = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }
}
