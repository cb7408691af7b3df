//! Shared Tailwind class strings so pages stay visually consistent.

// ============================================
// BUTTON STYLES
// ============================================

pub const BTN_PRIMARY: &str =
    "rounded-lg bg-emerald-600 px-4 py-2 text-sm font-semibold text-white hover:bg-emerald-500 disabled:opacity-50";

pub const BTN_SECONDARY: &str =
    "rounded-lg border border-slate-600 px-4 py-2 text-sm font-semibold text-slate-200 hover:bg-slate-800";

pub const BTN_DANGER: &str =
    "rounded-lg border border-rose-500/40 px-3 py-1.5 text-xs font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10";

pub const BTN_SMALL: &str =
    "rounded border border-slate-700 px-2 py-1 text-xs text-slate-300 hover:border-emerald-600 hover:text-emerald-300";

// ============================================
// INPUT STYLES
// ============================================

pub const INPUT: &str =
    "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-emerald-500 focus:outline-none";

pub const TEXTAREA: &str =
    "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 font-mono text-xs text-slate-100 focus:border-emerald-500 focus:outline-none";

pub const LABEL: &str = "block text-xs font-semibold uppercase text-slate-500";

// ============================================
// PANEL / TABLE STYLES
// ============================================

pub const PANEL: &str = "rounded-xl border border-slate-800 bg-slate-900/40 p-6";

pub const PANEL_TITLE: &str = "text-sm font-semibold uppercase tracking-wide text-slate-500";

pub const TABLE_CONTAINER: &str = "overflow-hidden rounded-xl border border-slate-800 bg-slate-900/40";

pub const TABLE_HEADER: &str = "border-b border-slate-800 bg-slate-900/60 text-xs uppercase text-slate-500";

pub const TABLE_DIVIDER: &str = "divide-y divide-slate-800";

// ============================================
// TEXT STYLES
// ============================================

pub const TEXT_MUTED: &str = "text-slate-500";

pub const ACCENT_TEXT: &str = "text-emerald-400";
