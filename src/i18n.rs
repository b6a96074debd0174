// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::InputKind;

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// 不支持的语言代码保持当前语言不变，返回 false
pub fn set_locale(locale: &str) -> bool {
    match SUPPORTED_LOCALES.iter().find(|l| l.eq_ignore_ascii_case(locale.trim())) {
        Some(l) => {
            rust_i18n::set_locale(l);
            true
        }
        None => false,
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use endcap_consolidation::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use endcap_consolidation::i18n::t_with_args;
/// let msg = t_with_args("run.assigned", &[("count", "2"), ("path", "/tmp/out.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 输入表名称
pub fn input_label(input: InputKind) -> String {
    match input {
        InputKind::Endcaps => t("input.endcaps"),
        InputKind::OpenSpace => t("input.open_space"),
    }
}
