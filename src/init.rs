use std::io::Write;

/// 初始化日誌系統
///
/// 預設只輸出 warn 以上的訊息，可用 `RUST_LOG` 環境變數調整
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
