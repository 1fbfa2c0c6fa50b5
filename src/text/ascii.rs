// ASCII
// -- CONTROL CHARACTERS
pub const HT: char = '\t'; // horizontal tab
pub const LF: char = '\n';
pub const CR: char = '\r';

// -- GRAPHIC CHARACTERS
pub const SP: char = ' '; // space
pub const DQUOTE: char = '"';
pub const LEFT_PAR: char = '(';
pub const RIGHT_PAR: char = ')';
pub const COMMA: char = ',';
pub const PERIOD: char = '.';
pub const COL: char = ':';
pub const SEM_COL: char = ';';
pub const LT: char = '<';
pub const GT: char = '>';
pub const AT: char = '@';
pub const LEFT_BRACKET: char = '[';
pub const BACKSLASH: char = '\\';
pub const RIGHT_BRACKET: char = ']';
