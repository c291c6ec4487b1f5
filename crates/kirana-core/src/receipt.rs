//! # Receipt Formatter
//!
//! Maps a recorded sale plus the store settings to a printable document.
//!
//! ## Language Selection
//! ```text
//! ┌──────────┬──────────────────────────┬──────────────────────────┬───────────────────┐
//! │ print_lang│ item name                │ header                   │ footer            │
//! ├──────────┼──────────────────────────┼──────────────────────────┼───────────────────┤
//! │ en       │ name_en                  │ store_name_en            │ English line      │
//! │ kn       │ name_kn, else name_en    │ store_name_kn, else en   │ Kannada line      │
//! │ both     │ "en / kn" if kn differs  │ "en / kn" if kn present  │ both, one per line│
//! └──────────┴──────────────────────────┴──────────────────────────┴───────────────────┘
//! ```
//!
//! ## Total Fidelity
//! The printed total is `sale.total` as recorded. It is never re-summed from
//! the lines at render time, so a reprint always matches the original bill.
//!
//! ## Clock Time
//! Sales are stored in UTC. The receipt shows the shop's wall-clock time, so
//! the caller passes the UTC offset to [`Receipt::render_in`]. Plain
//! [`Receipt::render`] prints UTC.
//!
//! Two renderings are offered: [`Receipt::to_text`] for fixed-width thermal
//! printers and [`Receipt::to_html`] for a 58 mm browser print surface.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, PrintLang, Sale, Settings};

/// English footer.
pub const THANK_YOU_EN: &str = "Thank you! Visit again";

/// Kannada footer.
pub const THANK_YOU_KN: &str = "ಧನ್ಯವಾದಗಳು! ಮತ್ತೆ ಬನ್ನಿ";

/// Narrowest text layout we will produce.
const MIN_TEXT_WIDTH: usize = 24;

// =============================================================================
// Document
// =============================================================================

/// One printed bill line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    /// Name in the selected language(s).
    pub name: String,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub unit_price: Money,
    /// Present only when the line was discounted.
    #[ts(as = "Option<String>")]
    pub discount: Option<Decimal>,
    /// Rounded line subtotal.
    pub amount: Money,
}

impl ReceiptLine {
    /// `"2 × ₹60.00"`, with `" (-10%)"` appended for discounted lines.
    pub fn rate_text(&self) -> String {
        let mut text = format!("{} × {}", self.quantity.normalize(), self.unit_price);
        if let Some(discount) = self.discount {
            let _ = write!(text, " (-{}%)", discount.normalize());
        }
        text
    }
}

/// A complete printable bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Document title for the print surface.
    pub title: String,
    /// Store name line(s) at the top.
    pub header: String,
    pub phone: Option<String>,
    /// Sale time at the shop's UTC offset.
    #[ts(as = "String")]
    pub date: DateTime<FixedOffset>,
    pub lines: Vec<ReceiptLine>,
    /// Copied verbatim from the sale.
    pub total: Money,
    /// Thank-you text; two lines in bilingual mode.
    pub footer: String,
    pub lang: PrintLang,
}

impl Receipt {
    /// Builds the receipt for a sale with the date shown in UTC.
    pub fn render(sale: &Sale, settings: &Settings) -> Self {
        Self::render_in(sale, settings, Utc.fix())
    }

    /// Builds the receipt for a sale with the date shown at `offset`.
    /// Deterministic and side-effect free.
    pub fn render_in(sale: &Sale, settings: &Settings, offset: FixedOffset) -> Self {
        let lang = settings.print_lang;

        Receipt {
            title: format!("Bill - {}", settings.store_name_en),
            header: header_name(settings, lang),
            phone: settings.phone().map(str::to_string),
            date: sale.date.with_timezone(&offset),
            lines: sale
                .items
                .iter()
                .map(|line| ReceiptLine {
                    name: item_name(line, lang),
                    quantity: line.quantity,
                    unit_price: line.item.price,
                    discount: (line.discount > Decimal::ZERO).then_some(line.discount),
                    amount: line.subtotal(),
                })
                .collect(),
            total: sale.total,
            footer: footer(lang),
            lang,
        }
    }

    /// Sale time as `DD/MM/YYYY HH:MM` on the shop's clock.
    pub fn date_line(&self) -> String {
        self.date.format("%d/%m/%Y %H:%M").to_string()
    }

    /// Plain-text layout for a thermal printer `width` columns wide.
    pub fn to_text(&self, width: usize) -> String {
        let width = width.max(MIN_TEXT_WIDTH);
        let rule = "-".repeat(width);
        let mut out: Vec<String> = Vec::new();

        for line in self.header.lines() {
            out.extend(wrap(line, width).iter().map(|l| center(l, width)));
        }
        if let Some(phone) = &self.phone {
            out.push(center(&format!("Ph: {}", phone), width));
        }
        out.push(center(&self.date_line(), width));
        out.push(rule.clone());

        for line in &self.lines {
            out.extend(wrap(&line.name, width));
            out.push(pair(&format!("  {}", line.rate_text()), &line.amount.to_string(), width));
        }

        out.push(rule.clone());
        out.push(pair("TOTAL", &self.total.to_string(), width));
        out.push(rule);

        for line in self.footer.lines() {
            out.push(center(line, width));
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }

    /// HTML document sized for 58 mm paper.
    pub fn to_html(&self) -> String {
        let mut rows = String::new();
        for line in &self.lines {
            let _ = write!(
                rows,
                r#"
      <tr>
        <td style="padding:2px 0;vertical-align:top;">{}</td>
        <td style="padding:2px 0;text-align:right;white-space:nowrap;">{}</td>
        <td style="padding:2px 0;text-align:right;white-space:nowrap;">{}</td>
      </tr>"#,
                esc(&line.name),
                esc(&line.rate_text()),
                line.amount
            );
        }

        let phone = self
            .phone
            .as_deref()
            .map(|phone| format!(r#"<div class="sub">Ph: {}</div>"#, esc(phone)))
            .unwrap_or_default();
        let html_lang = if self.lang == PrintLang::En { "en" } else { "kn" };
        let footer = self
            .footer
            .lines()
            .map(esc)
            .collect::<Vec<_>>()
            .join("<br/>");

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8"/>
  <title>{title}</title>
  <style>
    @media print {{
      @page {{ size: 58mm auto; margin: 0; }}
      body {{ margin: 0; }}
    }}
    body {{ font-family: 'Noto Sans Kannada', 'Arial', sans-serif; font-size: 11px; width: 54mm; margin: 2mm auto; color: #000; }}
    h1 {{ font-size: 13px; font-weight: bold; margin: 0 0 2px; text-align: center; }}
    .sub {{ font-size: 10px; text-align: center; margin: 1px 0; }}
    .divider {{ border-top: 1px dashed #000; margin: 4px 0; }}
    table {{ width: 100%; border-collapse: collapse; }}
    td {{ font-size: 10px; }}
    .total-row {{ font-size: 12px; font-weight: bold; }}
    .footer {{ text-align: center; font-size: 10px; margin-top: 6px; }}
  </style>
</head>
<body>
  <h1>{header}</h1>
  {phone}
  <div class="sub">{date}</div>
  <div class="divider"></div>
  <table>
    <thead>
      <tr>
        <th style="text-align:left;font-size:10px;">Item</th>
        <th style="text-align:right;font-size:10px;">Qty×Rate</th>
        <th style="text-align:right;font-size:10px;">Amt</th>
      </tr>
    </thead>
    <tbody>{rows}
    </tbody>
  </table>
  <div class="divider"></div>
  <table>
    <tr class="total-row">
      <td>TOTAL</td>
      <td></td>
      <td style="text-align:right;">{total}</td>
    </tr>
  </table>
  <div class="divider"></div>
  <div class="footer">{footer}</div>
</body>
</html>
"#,
            lang = html_lang,
            title = esc(&self.title),
            header = esc(&self.header),
            phone = phone,
            date = self.date_line(),
            rows = rows,
            total = self.total,
            footer = footer,
        )
    }
}

// =============================================================================
// Language Selection
// =============================================================================

fn item_name(line: &CartItem, lang: PrintLang) -> String {
    let en = line.item.name_en.as_str();
    let kn = line.item.secondary_name();
    match (lang, kn) {
        (PrintLang::En, _) => en.to_string(),
        (PrintLang::Kn, Some(kn)) => kn.to_string(),
        (PrintLang::Kn, None) => en.to_string(),
        (PrintLang::Both, Some(kn)) if kn != en => format!("{} / {}", en, kn),
        (PrintLang::Both, _) => en.to_string(),
    }
}

fn header_name(settings: &Settings, lang: PrintLang) -> String {
    let en = settings.store_name_en.as_str();
    let kn = settings.secondary_store_name();
    match (lang, kn) {
        (PrintLang::En, _) => en.to_string(),
        (PrintLang::Kn, Some(kn)) => kn.to_string(),
        (PrintLang::Kn, None) => en.to_string(),
        (PrintLang::Both, Some(kn)) => format!("{} / {}", en, kn),
        (PrintLang::Both, None) => en.to_string(),
    }
}

fn footer(lang: PrintLang) -> String {
    match lang {
        PrintLang::En => THANK_YOU_EN.to_string(),
        PrintLang::Kn => THANK_YOU_KN.to_string(),
        PrintLang::Both => format!("{}\n{}", THANK_YOU_EN, THANK_YOU_KN),
    }
}

// =============================================================================
// Layout Helpers
// =============================================================================

fn esc(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn pair(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for token in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(token);
            continue;
        }
        if line.chars().count() + 1 + token.chars().count() > width {
            out.push(std::mem::take(&mut line));
            line.push_str(token);
        } else {
            line.push(' ');
            line.push_str(token);
        }
    }
    if !line.is_empty() || out.is_empty() {
        out.push(line);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
