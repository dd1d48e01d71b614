pub mod generator;

pub use generator::{AliasGenerator, is_valid_alias};

/// 别名字符集：大小写敏感的字母 + 数字
pub const ALIAS_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 用户自定义别名的最大长度
pub const MAX_ALIAS_LENGTH: usize = 64;

/// 与 HTTP 路由冲突的别名
pub const RESERVED_ALIASES: &[&str] = &["health", "shorten"];

pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| ALIAS_CHARSET[rand::random_range(0..ALIAS_CHARSET.len())] as char)
        .take(length)
        .collect()
}
