// relationships.rs — Contacts worth reaching out to.

use aura_backend::RelationshipContact;

use crate::app::App;

pub async fn execute(app: &App, reach_out: Option<&str>) -> anyhow::Result<()> {
    let contacts = app.backend.fetch_relationships().await?;
    print!("{}", render(&contacts));

    if let Some(id) = reach_out {
        let contact = contacts
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| anyhow::anyhow!("no contact with id {}", id))?;
        app.quick_actions().reach_out(contact);
    }
    Ok(())
}

pub fn render(contacts: &[RelationshipContact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        out.push_str(&format!(
            "{:<4} {:<15} {:<20} last: {}\n     → {}\n",
            contact.id, contact.name, contact.role, contact.last_contact, contact.suggestion
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::catalog;

    #[test]
    fn render_lists_suggestion_per_contact() {
        let text = render(&catalog::relationships());
        assert_eq!(text.matches('→').count(), 5);
        assert!(text.contains("r3   Mom"));
        assert!(text.contains("Call to check in"));
    }
}
