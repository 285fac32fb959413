/// 缓存键模块
/// 两个逻辑分区：限流时间戳日志与使用统计

/// 限流日志键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 使用统计键前缀
const USAGE_PREFIX: &str = "usage:";

/// 生成限流时间戳日志键
pub fn rate_limit_key(identity: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, identity)
}

/// 生成使用统计键
pub fn usage_key(identity: &str) -> String {
    format!("{}{}", USAGE_PREFIX, identity)
}
