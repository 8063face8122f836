//! Utility class -> declarations
//!
//! Each resolved utility carries a sort key so generated CSS follows a fixed
//! property order (layout before box model before typography before effects)
//! regardless of the order classes appear in templates.

use super::palette;

/// One CSS declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub property: &'static str,
    pub value: String,
}

/// A resolved utility class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utility {
    pub order: u16,
    pub decls: Vec<Decl>,
}

mod order {
    pub const A11Y: u16 = 10;
    pub const POINTER: u16 = 20;
    pub const POSITION: u16 = 30;
    pub const INSET: u16 = 40;
    pub const Z: u16 = 50;
    pub const MARGIN: u16 = 60;
    pub const DISPLAY: u16 = 70;
    pub const SIZING: u16 = 80;
    pub const FLEX: u16 = 90;
    pub const INTERACT: u16 = 100;
    pub const GRID: u16 = 110;
    pub const ALIGN: u16 = 120;
    pub const GAP: u16 = 130;
    pub const OVERFLOW: u16 = 140;
    pub const ROUNDED: u16 = 150;
    pub const BORDER: u16 = 160;
    pub const BORDER_COLOR: u16 = 165;
    pub const BG: u16 = 170;
    pub const PADDING: u16 = 180;
    pub const TEXT_ALIGN: u16 = 190;
    pub const FONT_SIZE: u16 = 200;
    pub const FONT_WEIGHT: u16 = 210;
    pub const TEXT_STYLE: u16 = 215;
    pub const LEADING: u16 = 220;
    pub const TEXT_COLOR: u16 = 230;
    pub const DECORATION: u16 = 240;
    pub const OPACITY: u16 = 250;
    pub const SHADOW: u16 = 260;
    pub const TRANSITION: u16 = 270;
}

fn decl(property: &'static str, value: impl Into<String>) -> Decl {
    Decl {
        property,
        value: value.into(),
    }
}

fn one(order: u16, property: &'static str, value: impl Into<String>) -> Option<Utility> {
    Some(Utility {
        order,
        decls: vec![decl(property, value)],
    })
}

fn many(order: u16, decls: &[(&'static str, &str)]) -> Option<Utility> {
    Some(Utility {
        order,
        decls: decls.iter().map(|(p, v)| decl(*p, *v)).collect(),
    })
}

/// Resolve a bare utility name (variants already stripped).
pub fn resolve(class: &str) -> Option<Utility> {
    if let Some(name) = class.strip_prefix('-') {
        return resolve_negative(name);
    }

    keyword(class)
        .or_else(|| spacing_family(class))
        .or_else(|| sizing(class))
        .or_else(|| colors(class))
        .or_else(|| typography(class))
        .or_else(|| borders(class))
        .or_else(|| effects(class))
        .or_else(|| layout(class))
}

fn keyword(class: &str) -> Option<Utility> {
    use order::*;

    match class {
        "sr-only" => many(
            A11Y,
            &[
                ("position", "absolute"),
                ("width", "1px"),
                ("height", "1px"),
                ("padding", "0"),
                ("margin", "-1px"),
                ("overflow", "hidden"),
                ("clip", "rect(0, 0, 0, 0)"),
                ("white-space", "nowrap"),
                ("border-width", "0"),
            ],
        ),
        "pointer-events-none" => one(POINTER, "pointer-events", "none"),
        "pointer-events-auto" => one(POINTER, "pointer-events", "auto"),
        "static" | "fixed" | "absolute" | "relative" | "sticky" => {
            one(POSITION, "position", class)
        }
        "block" | "inline-block" | "inline" | "flex" | "inline-flex" | "grid" | "inline-grid"
        | "table" | "contents" => one(DISPLAY, "display", class),
        "hidden" => one(DISPLAY, "display", "none"),
        "flex-row" => one(FLEX, "flex-direction", "row"),
        "flex-row-reverse" => one(FLEX, "flex-direction", "row-reverse"),
        "flex-col" => one(FLEX, "flex-direction", "column"),
        "flex-col-reverse" => one(FLEX, "flex-direction", "column-reverse"),
        "flex-wrap" => one(FLEX, "flex-wrap", "wrap"),
        "flex-nowrap" => one(FLEX, "flex-wrap", "nowrap"),
        "flex-1" => one(FLEX, "flex", "1 1 0%"),
        "flex-auto" => one(FLEX, "flex", "1 1 auto"),
        "flex-none" => one(FLEX, "flex", "none"),
        "grow" => one(FLEX, "flex-grow", "1"),
        "shrink-0" => one(FLEX, "flex-shrink", "0"),
        "cursor-pointer" => one(INTERACT, "cursor", "pointer"),
        "cursor-default" => one(INTERACT, "cursor", "default"),
        "cursor-not-allowed" => one(INTERACT, "cursor", "not-allowed"),
        "select-none" => one(INTERACT, "user-select", "none"),
        "select-text" => one(INTERACT, "user-select", "text"),
        "select-all" => one(INTERACT, "user-select", "all"),
        "appearance-none" => one(INTERACT, "appearance", "none"),
        "items-start" => one(ALIGN, "align-items", "flex-start"),
        "items-end" => one(ALIGN, "align-items", "flex-end"),
        "items-center" => one(ALIGN, "align-items", "center"),
        "items-baseline" => one(ALIGN, "align-items", "baseline"),
        "items-stretch" => one(ALIGN, "align-items", "stretch"),
        "justify-start" => one(ALIGN, "justify-content", "flex-start"),
        "justify-end" => one(ALIGN, "justify-content", "flex-end"),
        "justify-center" => one(ALIGN, "justify-content", "center"),
        "justify-between" => one(ALIGN, "justify-content", "space-between"),
        "justify-around" => one(ALIGN, "justify-content", "space-around"),
        "justify-evenly" => one(ALIGN, "justify-content", "space-evenly"),
        "overflow-hidden" | "overflow-auto" | "overflow-scroll" | "overflow-visible" => {
            one(OVERFLOW, "overflow", &class["overflow-".len()..])
        }
        "truncate" => many(
            OVERFLOW,
            &[
                ("overflow", "hidden"),
                ("text-overflow", "ellipsis"),
                ("white-space", "nowrap"),
            ],
        ),
        "whitespace-nowrap" => one(OVERFLOW, "white-space", "nowrap"),
        "whitespace-normal" => one(OVERFLOW, "white-space", "normal"),
        "text-left" | "text-center" | "text-right" | "text-justify" => {
            one(TEXT_ALIGN, "text-align", &class["text-".len()..])
        }
        "uppercase" | "lowercase" | "capitalize" => one(TEXT_STYLE, "text-transform", class),
        "normal-case" => one(TEXT_STYLE, "text-transform", "none"),
        "italic" => one(TEXT_STYLE, "font-style", "italic"),
        "not-italic" => one(TEXT_STYLE, "font-style", "normal"),
        "underline" => one(DECORATION, "text-decoration-line", "underline"),
        "line-through" => one(DECORATION, "text-decoration-line", "line-through"),
        "no-underline" => one(DECORATION, "text-decoration-line", "none"),
        "transition" => many(
            TRANSITION,
            &[
                (
                    "transition-property",
                    "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform, filter",
                ),
                ("transition-timing-function", "cubic-bezier(0.4, 0, 0.2, 1)"),
                ("transition-duration", "150ms"),
            ],
        ),
        "transition-none" => one(TRANSITION, "transition-property", "none"),
        _ => None,
    }
}

/// Spacing scale: `0`, `px`, `0.5` .. `96` (quarter rem steps).
pub fn spacing(key: &str) -> Option<String> {
    match key {
        "0" => return Some("0px".to_string()),
        "px" => return Some("1px".to_string()),
        _ => {}
    }

    if !key.chars().all(|c| c.is_ascii_digit() || c == '.')
        || key.starts_with('.')
        || key.ends_with('.')
    {
        return None;
    }
    let n: f64 = key.parse().ok()?;
    let halves = n * 2.0;
    if n <= 0.0 || n > 96.0 || halves.fract() != 0.0 {
        return None;
    }
    if n > 12.0 && n.fract() != 0.0 {
        return None;
    }
    if n > 12.0 && (n as u32) % 4 != 0 {
        return None;
    }
    Some(format!("{}rem", format_number(n / 4.0)))
}

fn format_number(n: f64) -> String {
    let s = format!("{:.6}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

fn fraction(key: &str) -> Option<String> {
    let (num, den) = key.split_once('/')?;
    let num: u32 = num.parse().ok()?;
    let den: u32 = den.parse().ok()?;
    if !matches!(den, 2 | 3 | 4 | 5 | 6 | 12) || num == 0 || num >= den {
        return None;
    }
    Some(format!("{}%", format_number(num as f64 * 100.0 / den as f64)))
}

fn spacing_family(class: &str) -> Option<Utility> {
    use order::*;

    if let Some(gap) = spacing_axis_gap(class) {
        return Some(gap);
    }

    let (prefix, key) = class.split_once('-')?;
    let sides: &[&'static str] = match prefix {
        "m" => &["margin"],
        "mx" => &["margin-left", "margin-right"],
        "my" => &["margin-top", "margin-bottom"],
        "mt" => &["margin-top"],
        "mr" => &["margin-right"],
        "mb" => &["margin-bottom"],
        "ml" => &["margin-left"],
        "p" => &["padding"],
        "px" => &["padding-left", "padding-right"],
        "py" => &["padding-top", "padding-bottom"],
        "pt" => &["padding-top"],
        "pr" => &["padding-right"],
        "pb" => &["padding-bottom"],
        "pl" => &["padding-left"],
        "gap" => &["gap"],
        _ => return None,
    };

    let is_margin = prefix.starts_with('m');
    let value = if is_margin && key == "auto" {
        "auto".to_string()
    } else {
        spacing(key)?
    };

    let order = match prefix {
        "gap" => GAP,
        p if p.starts_with('m') => MARGIN,
        _ => PADDING,
    };
    Some(Utility {
        order,
        decls: sides.iter().map(|p| decl(*p, value.clone())).collect(),
    })
}

fn spacing_axis_gap(class: &str) -> Option<Utility> {
    if let Some(key) = class.strip_prefix("gap-x-") {
        return one(order::GAP, "column-gap", spacing(key)?);
    }
    if let Some(key) = class.strip_prefix("gap-y-") {
        return one(order::GAP, "row-gap", spacing(key)?);
    }
    None
}

fn resolve_negative(name: &str) -> Option<Utility> {
    let negated = |mut u: Utility| {
        for d in &mut u.decls {
            if d.value == "0px" || d.value == "auto" {
                return None;
            }
            d.value = format!("-{}", d.value);
        }
        Some(u)
    };

    let (prefix, _) = name.split_once('-')?;
    if matches!(
        prefix,
        "m" | "mx" | "my" | "mt" | "mr" | "mb" | "ml" | "top" | "right" | "bottom" | "left" | "inset"
    ) {
        return resolve(name).and_then(negated);
    }
    None
}

fn sizing(class: &str) -> Option<Utility> {
    use order::*;

    let (prefix, key) = class.split_once('-')?;
    let property = match prefix {
        "w" => "width",
        "h" => "height",
        "top" | "right" | "bottom" | "left" => return inset(prefix, key),
        "inset" => return inset_all(key),
        "max" => return max_width(key),
        "min" => return min_size(key),
        _ => return None,
    };

    let value = match key {
        "auto" => "auto".to_string(),
        "full" => "100%".to_string(),
        "screen" if prefix == "w" => "100vw".to_string(),
        "screen" => "100vh".to_string(),
        "fit" => "fit-content".to_string(),
        _ => spacing(key).or_else(|| fraction(key))?,
    };
    one(SIZING, property, value)
}

fn inset_value(key: &str) -> Option<String> {
    match key {
        "auto" => Some("auto".to_string()),
        "full" => Some("100%".to_string()),
        _ => spacing(key).or_else(|| fraction(key)),
    }
}

fn inset(side: &str, key: &str) -> Option<Utility> {
    let property = match side {
        "top" => "top",
        "right" => "right",
        "bottom" => "bottom",
        _ => "left",
    };
    one(order::INSET, property, inset_value(key)?)
}

fn inset_all(key: &str) -> Option<Utility> {
    let value = inset_value(key)?;
    Some(Utility {
        order: order::INSET,
        decls: ["top", "right", "bottom", "left"]
            .into_iter()
            .map(|p| decl(p, value.clone()))
            .collect(),
    })
}

fn max_width(key: &str) -> Option<Utility> {
    let key = key.strip_prefix("w-")?;
    let value = match key {
        "none" => "none",
        "xs" => "20rem",
        "sm" => "24rem",
        "md" => "28rem",
        "lg" => "32rem",
        "xl" => "36rem",
        "2xl" => "42rem",
        "3xl" => "48rem",
        "4xl" => "56rem",
        "5xl" => "64rem",
        "6xl" => "72rem",
        "7xl" => "80rem",
        "full" => "100%",
        "prose" => "65ch",
        _ => return None,
    };
    one(order::SIZING, "max-width", value)
}

fn min_size(key: &str) -> Option<Utility> {
    let (axis, key) = key.split_once('-')?;
    let property = match axis {
        "w" => "min-width",
        "h" => "min-height",
        _ => return None,
    };
    let value = match (axis, key) {
        (_, "0") => "0px",
        (_, "full") => "100%",
        ("h", "screen") => "100vh",
        _ => return None,
    };
    one(order::SIZING, property, value)
}

fn colors(class: &str) -> Option<Utility> {
    use order::*;

    let (property, order, key) = if let Some(key) = class.strip_prefix("text-") {
        ("color", TEXT_COLOR, key)
    } else if let Some(key) = class.strip_prefix("bg-") {
        ("background-color", BG, key)
    } else if let Some(key) = class.strip_prefix("border-") {
        ("border-color", BORDER_COLOR, key)
    } else {
        return None;
    };

    one(order, property, palette::color(key)?)
}

fn typography(class: &str) -> Option<Utility> {
    use order::*;

    if let Some(size) = class.strip_prefix("text-") {
        let (font, line) = match size {
            "xs" => ("0.75rem", "1rem"),
            "sm" => ("0.875rem", "1.25rem"),
            "base" => ("1rem", "1.5rem"),
            "lg" => ("1.125rem", "1.75rem"),
            "xl" => ("1.25rem", "1.75rem"),
            "2xl" => ("1.5rem", "2rem"),
            "3xl" => ("1.875rem", "2.25rem"),
            "4xl" => ("2.25rem", "2.5rem"),
            "5xl" => ("3rem", "1"),
            "6xl" => ("3.75rem", "1"),
            _ => return None,
        };
        return many(FONT_SIZE, &[("font-size", font), ("line-height", line)]);
    }

    if let Some(weight) = class.strip_prefix("font-") {
        let value = match weight {
            "thin" => "100",
            "light" => "300",
            "normal" => "400",
            "medium" => "500",
            "semibold" => "600",
            "bold" => "700",
            "extrabold" => "800",
            "black" => "900",
            _ => return None,
        };
        return one(FONT_WEIGHT, "font-weight", value);
    }

    if let Some(leading) = class.strip_prefix("leading-") {
        let value = match leading {
            "none" => "1",
            "tight" => "1.25",
            "snug" => "1.375",
            "normal" => "1.5",
            "relaxed" => "1.625",
            "loose" => "2",
            _ => return None,
        };
        return one(LEADING, "line-height", value);
    }

    if let Some(tracking) = class.strip_prefix("tracking-") {
        let value = match tracking {
            "tight" => "-0.025em",
            "normal" => "0em",
            "wide" => "0.025em",
            "wider" => "0.05em",
            _ => return None,
        };
        return one(LEADING, "letter-spacing", value);
    }

    None
}

fn borders(class: &str) -> Option<Utility> {
    use order::*;

    match class {
        "border" => return one(BORDER, "border-width", "1px"),
        "border-t" => return one(BORDER, "border-top-width", "1px"),
        "border-r" => return one(BORDER, "border-right-width", "1px"),
        "border-b" => return one(BORDER, "border-bottom-width", "1px"),
        "border-l" => return one(BORDER, "border-left-width", "1px"),
        "border-solid" => return one(BORDER, "border-style", "solid"),
        "border-dashed" => return one(BORDER, "border-style", "dashed"),
        "rounded" => return one(ROUNDED, "border-radius", "0.25rem"),
        _ => {}
    }

    if let Some(width) = class.strip_prefix("border-") {
        if matches!(width, "0" | "2" | "4" | "8") {
            return one(BORDER, "border-width", format!("{width}px"));
        }
    }

    if let Some(radius) = class.strip_prefix("rounded-") {
        let value = match radius {
            "none" => "0px",
            "sm" => "0.125rem",
            "md" => "0.375rem",
            "lg" => "0.5rem",
            "xl" => "0.75rem",
            "2xl" => "1rem",
            "full" => "9999px",
            _ => return None,
        };
        return one(ROUNDED, "border-radius", value);
    }

    None
}

fn effects(class: &str) -> Option<Utility> {
    use order::*;

    if let Some(rest) = class.strip_prefix("shadow") {
        let value = match rest {
            "" => "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
            "-sm" => "0 1px 2px 0 rgb(0 0 0 / 0.05)",
            "-md" => "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            "-lg" => "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            "-none" => "0 0 #0000",
            _ => return None,
        };
        return one(SHADOW, "box-shadow", value);
    }

    if let Some(pct) = class.strip_prefix("opacity-") {
        let n: u32 = pct.parse().ok()?;
        if n > 100 || (n % 5 != 0) {
            return None;
        }
        return one(OPACITY, "opacity", format_number(n as f64 / 100.0));
    }

    if let Some(ms) = class.strip_prefix("duration-") {
        if matches!(ms, "75" | "100" | "150" | "200" | "300" | "500" | "700" | "1000") {
            return one(TRANSITION, "transition-duration", format!("{ms}ms"));
        }
    }

    None
}

fn layout(class: &str) -> Option<Utility> {
    use order::*;

    if let Some(z) = class.strip_prefix("z-") {
        return match z {
            "auto" | "0" | "10" | "20" | "30" | "40" | "50" => one(Z, "z-index", z),
            _ => None,
        };
    }

    if let Some(n) = class.strip_prefix("grid-cols-") {
        let n: u32 = n.parse().ok()?;
        if !(1..=12).contains(&n) {
            return None;
        }
        return one(
            GRID,
            "grid-template-columns",
            format!("repeat({n}, minmax(0, 1fr))"),
        );
    }

    if let Some(n) = class.strip_prefix("col-span-") {
        if n == "full" {
            return one(GRID, "grid-column", "1 / -1");
        }
        let n: u32 = n.parse().ok()?;
        if !(1..=12).contains(&n) {
            return None;
        }
        return one(GRID, "grid-column", format!("span {n} / span {n}"));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(class: &str) -> Vec<(String, String)> {
        resolve(class)
            .unwrap_or_else(|| panic!("{class} should resolve"))
            .decls
            .into_iter()
            .map(|d| (d.property.to_string(), d.value))
            .collect()
    }

    #[test]
    fn spacing_scale_is_quarter_rem() {
        assert_eq!(spacing("4").as_deref(), Some("1rem"));
        assert_eq!(spacing("0.5").as_deref(), Some("0.125rem"));
        assert_eq!(spacing("2.5").as_deref(), Some("0.625rem"));
        assert_eq!(spacing("64").as_deref(), Some("16rem"));
        assert_eq!(spacing("px").as_deref(), Some("1px"));
        assert_eq!(spacing("13"), None);
        assert_eq!(spacing("0.3"), None);
        assert_eq!(spacing("abc"), None);
    }

    #[test]
    fn axis_spacing_expands_to_two_sides() {
        assert_eq!(
            values("px-4"),
            vec![
                ("padding-left".to_string(), "1rem".to_string()),
                ("padding-right".to_string(), "1rem".to_string())
            ]
        );
        assert_eq!(values("mx-auto")[0].1, "auto");
        assert_eq!(values("gap-x-2"), vec![("column-gap".to_string(), "0.5rem".to_string())]);
    }

    #[test]
    fn negative_margins_negate_values() {
        assert_eq!(values("-mt-2"), vec![("margin-top".to_string(), "-0.5rem".to_string())]);
        assert!(resolve("-mt-0").is_none());
        assert!(resolve("-p-2").is_none());
    }

    #[test]
    fn fractions_become_percentages() {
        assert_eq!(values("w-1/2")[0].1, "50%");
        assert_eq!(values("w-1/3")[0].1, "33.333333%");
        assert!(resolve("w-3/2").is_none());
    }

    #[test]
    fn text_prefix_disambiguates_size_color_and_alignment() {
        assert_eq!(values("text-lg")[0].0, "font-size");
        assert_eq!(values("text-red-500"), vec![("color".to_string(), "#ef4444".to_string())]);
        assert_eq!(values("text-center")[0], ("text-align".to_string(), "center".to_string()));
    }

    #[test]
    fn border_width_and_color() {
        assert_eq!(values("border")[0].1, "1px");
        assert_eq!(values("border-2")[0].1, "2px");
        assert_eq!(values("border-gray-200")[0].0, "border-color");
    }

    #[test]
    fn unknown_classes_do_not_resolve() {
        for class in ["foo", "p-", "bg-teal-500", "text-7xl", "z-5", "opacity-33", "index.html"] {
            assert!(resolve(class).is_none(), "{class}");
        }
    }

    #[test]
    fn layout_before_typography_in_order() {
        let display = resolve("flex").unwrap().order;
        let margin = resolve("mt-4").unwrap().order;
        let font = resolve("font-bold").unwrap().order;
        assert!(margin < display && display < font);
    }
}
