//! Companion files shipped next to every exported page.
//!
//! Theme colours are not baked in here; the document head sets them as CSS
//! custom properties and these rules read them back.

pub const STYLE_FILE: &str = "style.css";
pub const SCRIPT_FILE: &str = "script.js";

pub const STYLE_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: var(--bg-color); color: var(--text-color); line-height: 1.6; }
a { color: var(--accent-color); }
img { max-width: 100%; height: auto; display: block; }
.site-header { display: flex; align-items: center; gap: 12px; padding: 16px 32px; }
.site-logo { height: 40px; width: auto; }
.site-title { font-size: 1.25rem; font-weight: 700; }
.main-visual img { width: 100%; max-height: 540px; object-fit: cover; }
.part { padding: 64px 32px; }
.part h2 { text-align: center; margin-bottom: 32px; font-size: 2rem; }
.button { display: inline-block; padding: 12px 28px; border-radius: 6px; background: var(--accent-color); color: #fff; text-decoration: none; }
.part-hero { display: flex; flex-wrap: wrap; align-items: center; gap: 32px; }
.hero-content { flex: 1 1 320px; }
.hero-content h1 { font-size: 2.5rem; line-height: 1.2; }
.hero-subtitle { font-size: 1.25rem; margin: 12px 0; }
.hero-description { margin-bottom: 24px; }
.hero-image { flex: 1 1 320px; }
.features-grid, .pricing-grid, .testimonial-grid, .blog-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 24px; }
.feature-card, .pricing-card, .testimonial-card, .blog-post { padding: 24px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.08); }
.feature-icon { font-size: 2rem; }
.price { font-size: 1.75rem; font-weight: 700; color: var(--accent-color); }
.pricing-card ul { list-style: none; margin: 16px 0; }
.contact-info { list-style: none; margin: 16px 0; }
.contact-form { display: grid; gap: 12px; max-width: 480px; }
.contact-form input, .contact-form textarea { padding: 10px; border: 1px solid #ccc; border-radius: 4px; }
.avatar { width: 56px; height: 56px; border-radius: 50%; object-fit: cover; }
.about-body { display: flex; flex-wrap: wrap; gap: 32px; align-items: center; }
.gallery-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; }
.gallery-grid img { width: 100%; height: 200px; object-fit: cover; border-radius: 4px; }
.blog-post time { font-size: 0.875rem; opacity: 0.7; }
.faq-item { border-bottom: 1px solid #ddd; padding: 16px 0; }
.faq-item summary { cursor: pointer; font-weight: 600; }
.part-footer { padding: 24px 32px; text-align: center; }
.part-unsupported { text-align: center; opacity: 0.6; }
.reveal { opacity: 0; transform: translateY(20px); transition: opacity 0.6s ease, transform 0.6s ease; }
.reveal.in-view { opacity: 1; transform: translateY(0); }
.page-top { position: fixed; right: 24px; bottom: 24px; width: 44px; height: 44px; border: none; border-radius: 50%; background: var(--accent-color); color: #fff; font-size: 1.25rem; cursor: pointer; opacity: 0; pointer-events: none; transition: opacity 0.3s ease; }
.page-top.show { opacity: 1; pointer-events: auto; }
"#;

pub const SCRIPT_JS: &str = r##"
document.addEventListener('DOMContentLoaded', function () {
  document.querySelectorAll('a[href^="#"]').forEach(function (link) {
    link.addEventListener('click', function (event) {
      var target = document.querySelector(link.getAttribute('href'));
      if (target) {
        event.preventDefault();
        target.scrollIntoView({ behavior: 'smooth', block: 'start' });
      }
    });
  });

  document.querySelectorAll('.contact-form').forEach(function (form) {
    form.addEventListener('submit', function (event) {
      event.preventDefault();
      form.reset();
      alert('Thank you! Your message has been sent.');
    });
  });

  if ('IntersectionObserver' in window) {
    var cards = document.querySelectorAll('.feature-card, .pricing-card, .testimonial-card, .blog-post, .gallery-img');
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (entry.isIntersecting) {
          entry.target.classList.add('in-view');
          observer.unobserve(entry.target);
        }
      });
    }, { threshold: 0.1 });
    cards.forEach(function (card) {
      card.classList.add('reveal');
      observer.observe(card);
    });
  }

  var pageTop = document.createElement('button');
  pageTop.type = 'button';
  pageTop.className = 'page-top';
  pageTop.setAttribute('aria-label', 'Back to top');
  pageTop.textContent = '\u2191';
  pageTop.addEventListener('click', function () {
    window.scrollTo({ top: 0, behavior: 'smooth' });
  });
  document.body.appendChild(pageTop);
  window.addEventListener('scroll', function () {
    pageTop.classList.toggle('show', window.pageYOffset > 300);
  });
});
"##;

/// Extra rules for the editing surface
pub const PREVIEW_CSS: &str = r#"
.part-wrapper { position: relative; outline: 1px dashed transparent; }
.part-wrapper:hover { outline-color: var(--accent-color); }
.part-controls { position: absolute; top: 8px; right: 8px; display: flex; gap: 4px; z-index: 10; }
.part-controls button { padding: 4px 8px; font-size: 0.75rem; cursor: pointer; }
.part-hidden { opacity: 0.35; }
.footer-placeholder { padding: 24px 32px; text-align: center; border-top: 1px dashed #999; opacity: 0.6; }
.gallery-empty { text-align: center; opacity: 0.6; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_keeps_anchor_selector_intact() {
        assert!(SCRIPT_JS.contains(r##"a[href^="#"]"##));
        assert!(SCRIPT_JS.trim_end().ends_with("});"));
    }

    #[test]
    fn test_script_classes_have_rules() {
        for class in ["page-top", "reveal", "in-view"] {
            assert!(SCRIPT_JS.contains(class), "script misses {}", class);
            assert!(STYLE_CSS.contains(&format!(".{}", class)), "style misses {}", class);
        }
    }
}
