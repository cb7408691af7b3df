#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod domain;
mod infra;
mod ui;
mod util;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{
    tao::{dpi::LogicalSize, window::WindowBuilder},
    Config as DesktopConfig,
};

#[cfg(feature = "desktop")]
use crate::util::version::{version_label, APP_NAME};

fn main() {
    // WebKitGTK's DMABUF renderer breaks on several Wayland drivers.
    if std::env::var("WAYLAND_DISPLAY").is_ok()
        && std::env::var("WEBKIT_DISABLE_DMABUF_RENDERER").is_err()
    {
        std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
    }

    let builder = LaunchBuilder::new();

    #[cfg(feature = "desktop")]
    let builder = {
        let config = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("{APP_NAME} {}", version_label()))
                    .with_inner_size(LogicalSize::new(1280.0, 880.0))
            )
        };
        builder.with_cfg(config)
    };

    #[cfg(not(feature = "desktop"))]
    let builder = builder;

    builder.launch(app::App);
}
