//! Number format codes
//!
//! Cells carry their number format as a format code string. The codes below
//! are the ones most applications need; [`builtin_id`] maps a code to the
//! numFmtId Excel reserves for it, so such formats need no `<numFmt>` entry.

/// General
pub const GENERAL: &str = "General";
/// 0
pub const NUMBER_NO_DECIMAL_PLACES: &str = "0";
/// 0.00
pub const NUMBER_TWO_DECIMAL_PLACES: &str = "0.00";
/// 0%
pub const PERCENT_NO_DECIMAL_PLACES: &str = "0%";
/// 0.00%
pub const PERCENT_TWO_DECIMAL_PLACES: &str = "0.00%";
/// @
pub const TEXT: &str = "@";
pub const DATE_AND_TIME: &str = "d/m/yyyy h:mm";
pub const DATE_ONLY: &str = "d/m/yyyy";
pub const TIME_ONLY: &str = "h:mm";
pub const ACCOUNTING: &str = "\"$\"#,##0.00_);[Red](\"$\"#,##0.00)";

/// First numFmtId available for custom formats
pub const FIRST_CUSTOM_ID: u32 = 164;

/// Look up the built-in numFmtId for a format code
pub fn builtin_id(code: &str) -> Option<u32> {
    let id = match code {
        "General" => 0,
        "0" => 1,
        "0.00" => 2,
        "#,##0" => 3,
        "#,##0.00" => 4,
        "0%" => 9,
        "0.00%" => 10,
        "0.00E+00" => 11,
        "# ?/?" => 12,
        "# ??/??" => 13,
        "mm-dd-yy" => 14,
        "d-mmm-yy" => 15,
        "d-mmm" => 16,
        "mmm-yy" => 17,
        "h:mm AM/PM" => 18,
        "h:mm:ss AM/PM" => 19,
        "h:mm" => 20,
        "h:mm:ss" => 21,
        "m/d/yy h:mm" => 22,
        "#,##0 ;(#,##0)" => 37,
        "#,##0 ;[Red](#,##0)" => 38,
        "#,##0.00;(#,##0.00)" => 39,
        "#,##0.00;[Red](#,##0.00)" => 40,
        "mm:ss" => 45,
        "[h]:mm:ss" => 46,
        "mmss.0" => 47,
        "##0.0E+0" => 48,
        "@" => 49,
        _ => return None,
    };
    Some(id)
}
