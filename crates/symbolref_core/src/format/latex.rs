//! Glyph to LaTeX command table.
//!
//! Lookup is exact-match on the glyph string: no case folding and no
//! decomposition of combining sequences.

use std::borrow::Cow;

/// Returns the LaTeX command for `glyph`, or `\text{<glyph>}` when unknown.
pub fn latex_command(glyph: &str) -> Cow<'static, str> {
    match lookup(glyph) {
        Some(command) => Cow::Borrowed(command),
        None => Cow::Owned(format!("\\text{{{glyph}}}")),
    }
}

/// Table lookup without the `\text{}` fallback.
pub fn lookup(glyph: &str) -> Option<&'static str> {
    let command = match glyph {
        // Greek, lowercase
        "α" => "\\alpha",
        "β" => "\\beta",
        "γ" => "\\gamma",
        "δ" => "\\delta",
        "ε" => "\\epsilon",
        "ζ" => "\\zeta",
        "η" => "\\eta",
        "θ" => "\\theta",
        "ι" => "\\iota",
        "κ" => "\\kappa",
        "λ" => "\\lambda",
        "μ" => "\\mu",
        "ν" => "\\nu",
        "ξ" => "\\xi",
        "ο" => "\\omicron",
        "π" => "\\pi",
        "ρ" => "\\rho",
        "σ" => "\\sigma",
        "τ" => "\\tau",
        "υ" => "\\upsilon",
        "φ" => "\\phi",
        "χ" => "\\chi",
        "ψ" => "\\psi",
        "ω" => "\\omega",
        // Greek, uppercase
        "Α" => "\\Alpha",
        "Β" => "\\Beta",
        "Γ" => "\\Gamma",
        "Δ" => "\\Delta",
        "Ε" => "\\Epsilon",
        "Ζ" => "\\Zeta",
        "Η" => "\\Eta",
        "Θ" => "\\Theta",
        "Ι" => "\\Iota",
        "Κ" => "\\Kappa",
        "Λ" => "\\Lambda",
        "Μ" => "\\Mu",
        "Ν" => "\\Nu",
        "Ξ" => "\\Xi",
        "Ο" => "\\Omicron",
        "Π" => "\\Pi",
        "Ρ" => "\\Rho",
        "Σ" => "\\Sigma",
        "Τ" => "\\Tau",
        "Υ" => "\\Upsilon",
        "Φ" => "\\Phi",
        "Χ" => "\\Chi",
        "Ψ" => "\\Psi",
        "Ω" => "\\Omega",
        // Big operators
        "∑" => "\\sum",
        "∏" => "\\prod",
        "∫" => "\\int",
        "∬" => "\\iint",
        "∭" => "\\iiint",
        "∮" => "\\oint",
        "√" => "\\sqrt{}",
        "∞" => "\\infty",
        "∂" => "\\partial",
        "∇" => "\\nabla",
        // Arithmetic
        "±" => "\\pm",
        "∓" => "\\mp",
        "×" => "\\times",
        "÷" => "\\div",
        // Relations
        "≤" => "\\leq",
        "≥" => "\\geq",
        "≠" => "\\neq",
        "≈" => "\\approx",
        "≡" => "\\equiv",
        // Sets and logic
        "∈" => "\\in",
        "∉" => "\\notin",
        "∀" => "\\forall",
        "∃" => "\\exists",
        "∅" => "\\emptyset",
        "∩" => "\\cap",
        "∪" => "\\cup",
        "⊂" => "\\subset",
        "⊃" => "\\supset",
        "⊆" => "\\subseteq",
        "⊇" => "\\supseteq",
        "∧" => "\\land",
        "∨" => "\\lor",
        "¬" => "\\lnot",
        // Arrows
        "→" => "\\rightarrow",
        "←" => "\\leftarrow",
        "↔" => "\\leftrightarrow",
        "⇒" => "\\Rightarrow",
        "⇐" => "\\Leftarrow",
        "⇔" => "\\Leftrightarrow",
        _ => return None,
    };
    Some(command)
}
