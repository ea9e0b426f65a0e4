//! # Quotation Confirmation Template
//!
//! Renders the Spanish confirmation email sent to the customer after
//! checkout: an HTML body, a plain-text body and the subject line.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <company name>                    Cotización Recibida                 │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  ¡Hemos recibido su solicitud de cotización!  Estimado/a <name>, ...   │
//! │                                                                         │
//! │  Detalles       Número · Fecha · Estado [PENDIENTE]                    │
//! │  Productos      Producto │ Precio Unit. │ Cantidad │ Subtotal          │
//! │                 ...                                  TOTAL: 1.234,56 € │
//! │  Comentarios    (only when the quotation has notes)                    │
//! │  Próximos Pasos 1. 2. 3.                                               │
//! │  Contacto       email · teléfono · horario                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything interpolated from customer or catalog data is HTML-escaped in
//! the HTML body.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, FixedOffset, Local, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use quote_core::{Money, Quotation};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const NEXT_STEPS: [&str; 3] = [
    "Nuestro equipo revisará su solicitud en las próximas 24 horas",
    "Un asesor comercial se pondrá en contacto con usted",
    "Recibirá una cotización detallada con precios y condiciones",
];

/// Company details printed in the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub hours: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Su Empresa S.L.".to_string(),
            email: "ventas@empresa.com".to_string(),
            phone: "+34 123 456 789".to_string(),
            hours: "Lunes a Viernes, 9:00 - 18:00".to_string(),
        }
    }
}

/// A rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// Renders confirmation emails for one company.
#[derive(Debug, Clone)]
pub struct QuotationTemplate {
    company: CompanyProfile,
    offset: FixedOffset,
}

impl QuotationTemplate {
    /// Dates are shown in the machine's local offset.
    pub fn new(company: CompanyProfile) -> Self {
        QuotationTemplate {
            company,
            offset: Local::now().offset().fix(),
        }
    }

    /// Overrides the offset used when printing dates.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    pub fn subject(&self, quotation: &Quotation) -> String {
        format!("Cotización Recibida - {}", quotation.id())
    }

    pub fn render(&self, quotation: &Quotation) -> EmailTemplate {
        EmailTemplate {
            subject: self.subject(quotation),
            html_content: self.render_html(quotation),
            text_content: self.render_text(quotation),
        }
    }

    fn render_html(&self, quotation: &Quotation) -> String {
        let company = &self.company;
        let date = format_date_es(quotation.created_at(), self.offset);

        let mut rows = String::new();
        for item in quotation.items() {
            let _ = write!(
                rows,
                r#"
      <tr>
        <td style="padding: 12px; border-bottom: 1px solid #e5e7eb;">{name}</td>
        <td style="padding: 12px; border-bottom: 1px solid #e5e7eb; text-align: center;">{price}</td>
        <td style="padding: 12px; border-bottom: 1px solid #e5e7eb; text-align: center;">{quantity}</td>
        <td style="padding: 12px; border-bottom: 1px solid #e5e7eb; text-align: right;">{subtotal}</td>
      </tr>"#,
                name = escape_html(item.product_name()),
                price = format_eur(item.product_price()),
                quantity = item.quantity(),
                subtotal = format_eur(item.subtotal()),
            );
        }

        let notes = match quotation.notes() {
            Some(notes) => format!(
                r#"
  <div style="margin-bottom: 20px;">
    <h3 style="color: #374151; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Comentarios</h3>
    <div style="background: #f9fafb; padding: 15px; border-radius: 8px; border-left: 4px solid #2563eb;">{}</div>
  </div>"#,
                escape_html(notes)
            ),
            None => String::new(),
        };

        let steps: String = NEXT_STEPS
            .iter()
            .map(|step| format!(r#"<li style="margin-bottom: 8px;">{step}</li>"#))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Cotización Recibida</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="text-align: center; margin-bottom: 30px;">
    <h1 style="color: #2563eb; margin-bottom: 10px;">{company_name}</h1>
    <p style="color: #6b7280; margin: 0;">Cotización Recibida</p>
  </div>

  <div style="background: #f9fafb; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
    <h2 style="color: #059669; margin-top: 0;">¡Hemos recibido su solicitud de cotización!</h2>
    <p>Estimado/a {customer},</p>
    <p>Gracias por su interés en nuestros productos. Hemos recibido su solicitud de cotización y nuestro equipo comercial la está revisando.</p>
  </div>

  <div style="margin-bottom: 20px;">
    <h3 style="color: #374151; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Detalles de la Cotización</h3>
    <table style="width: 100%; margin-bottom: 15px;">
      <tr><td style="padding: 8px 0; font-weight: bold;">Número de Cotización:</td><td style="padding: 8px 0; font-family: monospace;">{id}</td></tr>
      <tr><td style="padding: 8px 0; font-weight: bold;">Fecha:</td><td style="padding: 8px 0;">{date}</td></tr>
      <tr><td style="padding: 8px 0; font-weight: bold;">Estado:</td><td style="padding: 8px 0;"><span style="background: #fef3c7; color: #92400e; padding: 4px 8px; border-radius: 4px; font-size: 12px;">PENDIENTE</span></td></tr>
    </table>
  </div>

  <div style="margin-bottom: 20px;">
    <h3 style="color: #374151; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Productos Cotizados</h3>
    <table style="width: 100%; border-collapse: collapse; border: 1px solid #e5e7eb;">
      <thead>
        <tr style="background: #f9fafb;">
          <th style="padding: 12px; text-align: left; border-bottom: 1px solid #e5e7eb;">Producto</th>
          <th style="padding: 12px; text-align: center; border-bottom: 1px solid #e5e7eb;">Precio Unit.</th>
          <th style="padding: 12px; text-align: center; border-bottom: 1px solid #e5e7eb;">Cantidad</th>
          <th style="padding: 12px; text-align: right; border-bottom: 1px solid #e5e7eb;">Subtotal</th>
        </tr>
      </thead>
      <tbody>{rows}
      </tbody>
      <tfoot>
        <tr style="background: #f9fafb; font-weight: bold;">
          <td colspan="3" style="padding: 12px; text-align: right; border-top: 2px solid #e5e7eb;">TOTAL:</td>
          <td style="padding: 12px; text-align: right; border-top: 2px solid #e5e7eb; font-size: 18px; color: #059669;">{total}</td>
        </tr>
      </tfoot>
    </table>
  </div>
{notes}
  <div style="background: #eff6ff; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
    <h3 style="color: #1d4ed8; margin-top: 0;">Próximos Pasos</h3>
    <ol style="margin: 10px 0; padding-left: 20px;">{steps}</ol>
  </div>

  <div style="background: #f9fafb; padding: 20px; border-radius: 8px; text-align: center;">
    <h3 style="color: #374151; margin-top: 0;">Información de Contacto</h3>
    <p style="margin: 5px 0;"><strong>Email:</strong> {company_email}</p>
    <p style="margin: 5px 0;"><strong>Teléfono:</strong> {company_phone}</p>
    <p style="margin: 5px 0;"><strong>Horario:</strong> {company_hours}</p>
  </div>

  <div style="text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 12px;">
    <p>Este email fue enviado automáticamente. Por favor, no responda a esta dirección.</p>
    <p>© {year} {company_name}. Todos los derechos reservados.</p>
  </div>
</body>
</html>
"#,
            company_name = escape_html(&company.name),
            customer = escape_html(quotation.customer_name()),
            id = escape_html(quotation.id()),
            date = date,
            rows = rows,
            total = format_eur(quotation.total()),
            notes = notes,
            steps = steps,
            company_email = escape_html(&company.email),
            company_phone = escape_html(&company.phone),
            company_hours = escape_html(&company.hours),
            year = quotation.created_at().with_timezone(&self.offset).year(),
        )
    }

    fn render_text(&self, quotation: &Quotation) -> String {
        let company = &self.company;
        let date = format_date_es(quotation.created_at(), self.offset);

        let mut text = String::new();
        let _ = writeln!(text, "Cotización Recibida - {}", quotation.id());
        let _ = writeln!(text);
        let _ = writeln!(text, "Estimado/a {},", quotation.customer_name());
        let _ = writeln!(text);
        let _ = writeln!(
            text,
            "Hemos recibido su solicitud de cotización con los siguientes detalles:"
        );
        let _ = writeln!(text);
        let _ = writeln!(text, "INFORMACIÓN DE LA COTIZACIÓN:");
        let _ = writeln!(text, "- Número: {}", quotation.id());
        let _ = writeln!(text, "- Fecha: {date}");
        let _ = writeln!(text, "- Estado: Pendiente");
        let _ = writeln!(text);
        let _ = writeln!(text, "PRODUCTOS COTIZADOS:");
        for item in quotation.items() {
            let _ = writeln!(
                text,
                "- {}: {} x {} = {}",
                item.product_name(),
                format_eur(item.product_price()),
                item.quantity(),
                format_eur(item.subtotal())
            );
        }
        let _ = writeln!(text);
        let _ = writeln!(text, "TOTAL: {}", format_eur(quotation.total()));
        let _ = writeln!(text);
        if let Some(notes) = quotation.notes() {
            let _ = writeln!(text, "COMENTARIOS:");
            let _ = writeln!(text, "{notes}");
            let _ = writeln!(text);
        }
        let _ = writeln!(text, "PRÓXIMOS PASOS:");
        for (i, step) in NEXT_STEPS.iter().enumerate() {
            let _ = writeln!(text, "{}. {step}", i + 1);
        }
        let _ = writeln!(text);
        let _ = writeln!(text, "CONTACTO:");
        let _ = writeln!(text, "Email: {}", company.email);
        let _ = writeln!(text, "Teléfono: {}", company.phone);
        let _ = writeln!(text, "Horario: {}", company.hours);
        let _ = writeln!(text);
        let _ = writeln!(text, "Gracias por confiar en nosotros.");
        let _ = writeln!(text);
        let _ = writeln!(text, "{}", company.name);
        text
    }
}

impl Default for QuotationTemplate {
    fn default() -> Self {
        Self::new(CompanyProfile::default())
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Formats an amount the Spanish way: `1.234,56 €`.
pub fn format_eur(amount: Money) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{fraction:02} €")
}

/// Formats a timestamp as `18 de octubre de 2026, 14:05` in `offset`.
pub fn format_date_es(at: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = at.with_timezone(&offset);
    format!(
        "{} de {} de {}, {:02}:{:02}",
        local.day(),
        MONTHS_ES[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use quote_core::{CustomerContact, Product, QuoteBook};

    fn quotation(notes: Option<&str>) -> Quotation {
        let mut book = QuoteBook::new();
        book.add_item(
            &Product::new(1, "Silla <Ergo>", Money::from_cents(123_456)),
            2,
        );
        book.add_item(&Product::new(2, "Mesa", Money::from_cents(9_950)), 1);

        let mut contact = CustomerContact::new("Ana & Co", "ana@x.com", "600");
        contact.notes = notes.map(str::to_string);
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
        book.create_quotation(&contact, "QT-1760796300000-abcdefghi".into(), at)
    }

    fn template() -> QuotationTemplate {
        QuotationTemplate::default().with_offset(FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(Money::from_cents(0)), "0,00 €");
        assert_eq!(format_eur(Money::from_cents(1099)), "10,99 €");
        assert_eq!(format_eur(Money::from_cents(123_456)), "1.234,56 €");
        assert_eq!(format_eur(Money::from_cents(123_456_789)), "1.234.567,89 €");
        assert_eq!(format_eur(Money::from_cents(-5)), "-0,05 €");
    }

    #[test]
    fn test_format_date_es() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
        assert_eq!(
            format_date_es(at, FixedOffset::east_opt(0).unwrap()),
            "18 de octubre de 2026, 14:05"
        );
        assert_eq!(
            format_date_es(at, FixedOffset::east_opt(2 * 3600).unwrap()),
            "18 de octubre de 2026, 16:05"
        );
    }

    #[test]
    fn test_subject() {
        assert_eq!(
            template().render(&quotation(None)).subject,
            "Cotización Recibida - QT-1760796300000-abcdefghi"
        );
    }

    #[test]
    fn test_html_body() {
        let html = template().render(&quotation(Some("<b>urgente</b>"))).html_content;

        assert!(html.contains("Estimado/a Ana &amp; Co,"));
        assert!(html.contains("Silla &lt;Ergo&gt;"));
        assert!(html.contains("2.469,12 €"));
        assert!(html.contains("2.568,62 €"));
        assert!(html.contains("PENDIENTE"));
        assert!(html.contains("18 de octubre de 2026, 14:05"));
        assert!(html.contains("&lt;b&gt;urgente&lt;/b&gt;"));
        assert!(!html.contains("<b>urgente</b>"));
        assert!(html.contains("ventas@empresa.com"));
        assert!(html.contains("© 2026 Su Empresa S.L."));
    }

    #[test]
    fn test_notes_section_only_with_notes() {
        let html = template().render(&quotation(None)).html_content;
        assert!(!html.contains("Comentarios"));

        let text = template().render(&quotation(None)).text_content;
        assert!(!text.contains("COMENTARIOS:"));
    }

    #[test]
    fn test_text_body() {
        let text = template().render(&quotation(Some("Entrega en Madrid"))).text_content;

        assert!(text.starts_with("Cotización Recibida - QT-1760796300000-abcdefghi\n"));
        assert!(text.contains("- Silla <Ergo>: 1.234,56 € x 2 = 2.469,12 €\n"));
        assert!(text.contains("- Mesa: 99,50 € x 1 = 99,50 €\n"));
        assert!(text.contains("TOTAL: 2.568,62 €\n"));
        assert!(text.contains("COMENTARIOS:\nEntrega en Madrid\n"));
        assert!(text.contains("1. Nuestro equipo revisará su solicitud en las próximas 24 horas\n"));
        assert!(text.contains("Horario: Lunes a Viernes, 9:00 - 18:00\n"));
        assert!(text.trim_end().ends_with("Su Empresa S.L."));
    }

    #[test]
    fn test_custom_company() {
        let company = CompanyProfile {
            name: "Muebles Norte".into(),
            email: "hola@norte.es".into(),
            ..CompanyProfile::default()
        };
        let rendered = QuotationTemplate::new(company).render(&quotation(None));
        assert!(rendered.html_content.contains("Muebles Norte"));
        assert!(rendered.text_content.contains("Email: hola@norte.es"));
    }
}
