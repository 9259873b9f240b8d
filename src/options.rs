use std::fmt::{self, Display};
use std::str::FromStr;

use derive_builder::Builder;

use crate::err::LuzError;

/// Language features accepted by the parser.
///
/// The grammar always accepts Lua 5.4 syntax; features switched off here
/// are reported as diagnostics on the finished tree.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default)]
pub struct SyntaxOptions {
    /// `#` line at the very start of the chunk.
    pub accept_shebang: bool,
    /// `goto name` and `::name::`.
    pub accept_goto: bool,
    /// Lone `;` statements.
    pub accept_empty_statements: bool,
    /// `& | ~ << >>` and unary `~`.
    pub accept_bitwise_operators: bool,
    /// `//`.
    pub accept_floor_division: bool,
    /// `\xXX` in strings.
    pub accept_hex_escapes: bool,
    /// `\z` in strings.
    pub accept_whitespace_escape: bool,
    /// `\u{XXX}` in strings.
    pub accept_unicode_escape: bool,
    /// `0x1.8p3`.
    pub accept_hex_floats: bool,
    /// Unknown escapes such as `\q` decode to the escaped character.
    pub accept_invalid_escapes: bool,
    /// `local x <const>` and `local x <close>`.
    pub accept_local_attributes: bool,
    /// Numerals without a fraction or exponent are integers. When off,
    /// every numeral is a float.
    pub integer_literals: bool,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        LuaVersion::Lua54.options()
    }
}

impl SyntaxOptions {
    pub fn builder() -> SyntaxOptionsBuilder {
        SyntaxOptionsBuilder::default()
    }

    /// Builder pre-filled with a version preset.
    pub fn builder_from(version: LuaVersion) -> SyntaxOptionsBuilder {
        let options = version.options();
        let mut builder = SyntaxOptionsBuilder::default();
        builder
            .accept_shebang(options.accept_shebang)
            .accept_goto(options.accept_goto)
            .accept_empty_statements(options.accept_empty_statements)
            .accept_bitwise_operators(options.accept_bitwise_operators)
            .accept_floor_division(options.accept_floor_division)
            .accept_hex_escapes(options.accept_hex_escapes)
            .accept_whitespace_escape(options.accept_whitespace_escape)
            .accept_unicode_escape(options.accept_unicode_escape)
            .accept_hex_floats(options.accept_hex_floats)
            .accept_invalid_escapes(options.accept_invalid_escapes)
            .accept_local_attributes(options.accept_local_attributes)
            .integer_literals(options.integer_literals);
        builder
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LuaVersion {
    Lua51,
    Lua52,
    Lua53,
    #[default]
    Lua54,
    LuaJit,
}

impl LuaVersion {
    pub fn options(self) -> SyntaxOptions {
        let at_least_52 = !matches!(self, LuaVersion::Lua51);
        let at_least_53 = matches!(self, LuaVersion::Lua53 | LuaVersion::Lua54);
        SyntaxOptions {
            accept_shebang: true,
            accept_goto: at_least_52,
            accept_empty_statements: at_least_52,
            accept_bitwise_operators: at_least_53,
            accept_floor_division: at_least_53,
            accept_hex_escapes: at_least_52,
            accept_whitespace_escape: at_least_52,
            accept_unicode_escape: at_least_53 || self == LuaVersion::LuaJit,
            accept_hex_floats: at_least_52,
            accept_invalid_escapes: self == LuaVersion::Lua51,
            accept_local_attributes: self == LuaVersion::Lua54,
            integer_literals: at_least_53,
        }
    }
}

impl Display for LuaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LuaVersion::Lua51 => "Lua 5.1",
            LuaVersion::Lua52 => "Lua 5.2",
            LuaVersion::Lua53 => "Lua 5.3",
            LuaVersion::Lua54 => "Lua 5.4",
            LuaVersion::LuaJit => "LuaJIT",
        })
    }
}

impl FromStr for LuaVersion {
    type Err = LuzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5.1" | "lua51" => Ok(LuaVersion::Lua51),
            "5.2" | "lua52" => Ok(LuaVersion::Lua52),
            "5.3" | "lua53" => Ok(LuaVersion::Lua53),
            "5.4" | "lua54" => Ok(LuaVersion::Lua54),
            "jit" | "luajit" => Ok(LuaVersion::LuaJit),
            _ => Err(LuzError::UnknownLuaVersion(s.to_string())),
        }
    }
}
