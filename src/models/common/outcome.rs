//! 页面处理结果
//!
//! 表单流程要么渲染页面（携带视图数据），要么重定向到另一个页面。

/// 重定向目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Dashboard,
    Login,
}

impl RedirectTarget {
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::Dashboard => "/dashboard",
            RedirectTarget::Login => "/login",
        }
    }
}

/// 页面处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Render(T),
    Redirect(RedirectTarget),
}

impl<T> PageOutcome<T> {
    pub fn is_redirect_to(&self, target: RedirectTarget) -> bool {
        matches!(self, PageOutcome::Redirect(t) if *t == target)
    }
}
