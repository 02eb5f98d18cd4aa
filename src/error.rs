use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Every failure an operation can produce. Display strings are what callers
/// see inside a failure envelope.
#[derive(Debug, Error)]
pub enum ScoutError {
    /* ---- validation: raised before any browser work ---- */
    #[error("分类'{0}'不在菜单中")]
    UnknownCategory(String),
    #[error("城市'{0}'不在支持列表中")]
    UnsupportedCity(String),
    #[error("区域'{region}'在{city}中未找到")]
    UnknownRegion { city: String, region: String },
    #[error("排序方式'{0}'不受支持")]
    UnknownSort(String),
    #[error("店铺ID'{0}'无效")]
    InvalidShopId(String),

    /* ---- auth / session ---- */
    /// No usable credential bundle on disk.
    #[error("需要登录并上传auth.json")]
    MissingAuth,
    /// Page loaded but the logged-in profile anchor never showed up.
    /// Worded like `MissingAuth`: stale cookies and markup drift look the same.
    #[error("需要登录并上传auth.json")]
    NotLoggedIn,
    #[error("浏览器启动失败: {0}")]
    Launch(String),

    /* ---- navigation ---- */
    #[error("页面加载失败或需要登录")]
    PageLoad,

    #[error("配置错误: {0}")]
    Config(String),
    #[error("{0}")]
    Browser(String),
    #[error("{0}")]
    Other(String),
}

impl ScoutError {
    /// True for failures detected before the browser is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScoutError::UnknownCategory(_)
                | ScoutError::UnsupportedCity(_)
                | ScoutError::UnknownRegion { .. }
                | ScoutError::UnknownSort(_)
                | ScoutError::InvalidShopId(_)
        )
    }
}

/* Conversions so `?` works smoothly */
impl From<std::io::Error> for ScoutError {
    fn from(e: std::io::Error) -> Self {
        ScoutError::Other(e.to_string())
    }
}
impl From<serde_json::Error> for ScoutError {
    fn from(e: serde_json::Error) -> Self {
        ScoutError::Other(e.to_string())
    }
}
impl From<chromiumoxide::error::CdpError> for ScoutError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        ScoutError::Browser(e.to_string())
    }
}
