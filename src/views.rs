//! Server-side HTML views.
//!
//! Each page is a plain function from data to an HTML string; the handler
//! wraps the result in `Response::html`. Field values are escaped before
//! interpolation.

use crate::fruit::Fruit;

/// The fruits list page: one entry per record with show/edit links and an
/// inline delete form (tunnelling DELETE through the `_method` override).
pub fn index(fruits: &[Fruit]) -> String {
    let mut rows = String::new();
    for fruit in fruits {
        let id = fruit.id.to_hex();
        let name = escape(&fruit.name);
        rows.push_str(&format!(
            concat!(
                "<li>",
                "<a href=\"/fruits/{id}\">{name}</a> ",
                "<a href=\"/fruits/{id}/edit\">edit</a>",
                "<form action=\"/fruits/{id}?_method=DELETE\" method=\"POST\">",
                "<input type=\"submit\" value=\"delete\">",
                "</form>",
                "</li>\n"
            ),
            id = id,
            name = name,
        ));
    }
    page(
        "Fruits",
        &format!(
            "<h1>Fruits</h1>\n<ul>\n{rows}</ul>\n<a href=\"/fruits/new\">new fruit</a>"
        ),
    )
}

/// The detail page for one fruit.
pub fn show(fruit: &Fruit) -> String {
    let verdict = if fruit.ready_to_eat {
        "It is ready to eat."
    } else {
        "It is not ready to eat, do not eat it!"
    };
    page(
        &fruit.name,
        &format!(
            concat!(
                "<h1>{name}</h1>\n",
                "<p>The {name} is {color}. {verdict}</p>\n",
                "<a href=\"/fruits/{id}/edit\">edit</a>\n",
                "<a href=\"/fruits\">back to fruits</a>"
            ),
            name = escape(&fruit.name),
            color = escape(&fruit.color),
            verdict = verdict,
            id = fruit.id.to_hex(),
        ),
    )
}

/// The creation form. Submits a plain POST to `/fruits`.
pub fn new() -> String {
    page(
        "New fruit",
        &format!(
            "<h1>New fruit</h1>\n{form}",
            form = form("/fruits", "", "", false)
        ),
    )
}

/// The edit form, pre-filled from the record. Submits a POST tunnelled to
/// PUT via the `_method` query parameter.
pub fn edit(fruit: &Fruit) -> String {
    let action = format!("/fruits/{}?_method=PUT", fruit.id.to_hex());
    page(
        "Edit fruit",
        &format!(
            "<h1>Edit {name}</h1>\n{form}",
            name = escape(&fruit.name),
            form = form(&action, &fruit.name, &fruit.color, fruit.ready_to_eat),
        ),
    )
}

/// The fixed body served (with 200) for any GET that matches no route.
pub fn fallback() -> String {
    concat!(
        "<div>\n",
        "  404 this page doesn't exist! <br />\n",
        "  <a href=\"/fruits\">Fruit</a> <br />\n",
        "  <a href=\"/vegetables\">Vegetables</a>\n",
        "</div>\n"
    )
    .to_owned()
}

fn form(action: &str, name: &str, color: &str, ready_to_eat: bool) -> String {
    let checked = if ready_to_eat { " checked" } else { "" };
    format!(
        concat!(
            "<form action=\"{action}\" method=\"POST\">\n",
            "  <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n",
            "  <label>Color <input type=\"text\" name=\"color\" value=\"{color}\"></label>\n",
            "  <label>Ready to eat ",
            "<input type=\"checkbox\" name=\"readyToEat\"{checked}></label>\n",
            "  <input type=\"submit\" value=\"save\">\n",
            "</form>"
        ),
        action = action,
        name = escape(name),
        color = escape(color),
        checked = checked,
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!doctype html>\n<html>\n<head><title>{title}</title></head>\n",
            "<body>\n{body}\n</body>\n</html>\n"
        ),
        title = escape(title),
        body = body,
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn grape() -> Fruit {
        Fruit {
            id: ObjectId::new(),
            name: "grape".into(),
            color: "purple".into(),
            ready_to_eat: false,
        }
    }

    #[test]
    fn index_links_every_fruit_by_id() {
        let fruit = grape();
        let html = index(std::slice::from_ref(&fruit));
        assert!(html.contains(&format!("/fruits/{}", fruit.id.to_hex())));
        assert!(html.contains(&format!("/fruits/{}?_method=DELETE", fruit.id.to_hex())));
        assert!(html.contains("grape"));
    }

    #[test]
    fn show_spells_out_the_readiness() {
        let mut fruit = grape();
        assert!(show(&fruit).contains("not ready to eat"));
        fruit.ready_to_eat = true;
        assert!(show(&fruit).contains("It is ready to eat."));
    }

    #[test]
    fn edit_prefills_the_form_and_tunnels_put() {
        let fruit = grape();
        let html = edit(&fruit);
        assert!(html.contains(&format!("/fruits/{}?_method=PUT", fruit.id.to_hex())));
        assert!(html.contains("value=\"grape\""));
        assert!(html.contains("value=\"purple\""));
        assert!(!html.contains("checked>"));
    }

    #[test]
    fn field_values_are_html_escaped() {
        let mut fruit = grape();
        fruit.name = "<script>".into();
        assert!(!show(&fruit).contains("<script>"));
        assert!(show(&fruit).contains("&lt;script&gt;"));
    }

    #[test]
    fn fallback_lists_the_navigation_links() {
        let html = fallback();
        assert!(html.contains("/fruits"));
        assert!(html.contains("/vegetables"));
    }
}
