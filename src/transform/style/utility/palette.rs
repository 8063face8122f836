//! Color palette for `text-*`, `bg-*` and `border-*` utilities

const SHADES: [&str; 10] = ["50", "100", "200", "300", "400", "500", "600", "700", "800", "900"];

const PALETTE: &[(&str, [&str; 10])] = &[
    (
        "gray",
        [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563",
            "#374151", "#1f2937", "#111827",
        ],
    ),
    (
        "red",
        [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626",
            "#b91c1c", "#991b1b", "#7f1d1d",
        ],
    ),
    (
        "yellow",
        [
            "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04",
            "#a16207", "#854d0e", "#713f12",
        ],
    ),
    (
        "green",
        [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a",
            "#15803d", "#166534", "#14532d",
        ],
    ),
    (
        "blue",
        [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb",
            "#1d4ed8", "#1e40af", "#1e3a8a",
        ],
    ),
    (
        "indigo",
        [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5",
            "#4338ca", "#3730a3", "#312e81",
        ],
    ),
    (
        "purple",
        [
            "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea",
            "#7e22ce", "#6b21a8", "#581c87",
        ],
    ),
    (
        "pink",
        [
            "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777",
            "#be185d", "#9d174d", "#831843",
        ],
    ),
];

/// Resolve `blue-500`, `white`, `transparent`, ... to a CSS color.
pub fn color(name: &str) -> Option<&'static str> {
    match name {
        "white" => return Some("#fff"),
        "black" => return Some("#000"),
        "transparent" => return Some("transparent"),
        "current" => return Some("currentColor"),
        "inherit" => return Some("inherit"),
        _ => {}
    }

    let (hue, shade) = name.rsplit_once('-')?;
    let (_, shades) = PALETTE.iter().find(|(h, _)| *h == hue)?;
    let idx = SHADES.iter().position(|s| *s == shade)?;
    Some(shades[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_palette_entries() {
        assert_eq!(color("blue-500"), Some("#3b82f6"));
        assert_eq!(color("gray-50"), Some("#f9fafb"));
        assert_eq!(color("white"), Some("#fff"));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert_eq!(color("blue-550"), None);
        assert_eq!(color("teal-500"), None);
        assert_eq!(color("blue"), None);
    }
}
