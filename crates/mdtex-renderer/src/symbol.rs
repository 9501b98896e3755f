//! Static command tables.

use phf::phf_map;

/// Greek letters, relations, arrows and assorted symbols, keyed by
/// command name without the backslash.
pub(crate) static SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Greek, lowercase
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ϵ",
    "varepsilon" => "ε",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "vartheta" => "ϑ",
    "iota" => "ι",
    "kappa" => "κ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "pi" => "π",
    "varpi" => "ϖ",
    "rho" => "ρ",
    "varrho" => "ϱ",
    "sigma" => "σ",
    "varsigma" => "ς",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "ϕ",
    "varphi" => "φ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",
    // Greek, uppercase
    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Theta" => "Θ",
    "Lambda" => "Λ",
    "Xi" => "Ξ",
    "Pi" => "Π",
    "Sigma" => "Σ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
    // Binary operations and relations
    "times" => "×",
    "div" => "÷",
    "cdot" => "⋅",
    "pm" => "±",
    "mp" => "∓",
    "leq" => "≤",
    "le" => "≤",
    "geq" => "≥",
    "ge" => "≥",
    "neq" => "≠",
    "ne" => "≠",
    "approx" => "≈",
    "equiv" => "≡",
    "sim" => "∼",
    "propto" => "∝",
    // Sets and logic
    "in" => "∈",
    "notin" => "∉",
    "subset" => "⊂",
    "supset" => "⊃",
    "subseteq" => "⊆",
    "supseteq" => "⊇",
    "cup" => "∪",
    "cap" => "∩",
    "emptyset" => "∅",
    "varnothing" => "∅",
    "forall" => "∀",
    "exists" => "∃",
    "neg" => "¬",
    "land" => "∧",
    "lor" => "∨",
    // Arrows
    "rightarrow" => "→",
    "to" => "→",
    "leftarrow" => "←",
    "Rightarrow" => "⇒",
    "Leftarrow" => "⇐",
    "leftrightarrow" => "↔",
    "Leftrightarrow" => "⇔",
    "mapsto" => "↦",
    // Miscellaneous
    "infty" => "∞",
    "partial" => "∂",
    "nabla" => "∇",
    "cdots" => "⋯",
    "ldots" => "…",
    "dots" => "…",
    "vdots" => "⋮",
    "ddots" => "⋱",
    "angle" => "∠",
    "perp" => "⊥",
    "parallel" => "∥",
    "therefore" => "∴",
    "because" => "∵",
    "oplus" => "⊕",
    "otimes" => "⊗",
    "circ" => "∘",
    "bullet" => "•",
    "star" => "⋆",
    "prime" => "′",
    "hbar" => "ℏ",
    "ell" => "ℓ",
    "aleph" => "ℵ",
};

/// Operators rendered large, with limits attaching under/over.
pub(crate) static BIG_OPERATORS: phf::Map<&'static str, &'static str> = phf_map! {
    "sum" => "∑",
    "prod" => "∏",
    "coprod" => "∐",
    "int" => "∫",
    "iint" => "∬",
    "iiint" => "∭",
    "oint" => "∮",
    "bigcup" => "⋃",
    "bigcap" => "⋂",
    "bigoplus" => "⨁",
    "bigotimes" => "⨂",
    "bigvee" => "⋁",
    "bigwedge" => "⋀",
};

/// Named operators typeset upright. A following `_` attaches underneath
/// (`\lim_{x \to 0}`, `\log_2`).
pub(crate) static LIMIT_OPERATORS: phf::Map<&'static str, &'static str> = phf_map! {
    "lim" => "lim",
    "limsup" => "lim sup",
    "liminf" => "lim inf",
    "max" => "max",
    "min" => "min",
    "sup" => "sup",
    "inf" => "inf",
    "argmax" => "arg max",
    "argmin" => "arg min",
    "det" => "det",
    "gcd" => "gcd",
    "sin" => "sin",
    "cos" => "cos",
    "tan" => "tan",
    "cot" => "cot",
    "sec" => "sec",
    "csc" => "csc",
    "arcsin" => "arcsin",
    "arccos" => "arccos",
    "arctan" => "arctan",
    "sinh" => "sinh",
    "cosh" => "cosh",
    "tanh" => "tanh",
    "log" => "log",
    "ln" => "ln",
    "exp" => "exp",
};
