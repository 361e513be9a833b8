//! Markup renderer.
//!
//! Pure mapping from `WidgetState` to HTML. Interactive elements carry
//! `data-action`, `data-value` and `data-review-id` attributes that the host
//! turns back into actions with `Action::from_dom`.

use crate::form::{FormField, FormStatus, ReviewForm, SUBMITTED_MESSAGE};
use crate::model::{Review, ReviewSummary};
use crate::pagination::{page_window, PageItem};
use crate::sort::SortOption;
use crate::stars::StarDisplay;
use crate::state::{ErrorKind, WidgetState};

/// Render the whole widget.
pub fn render_widget(state: &WidgetState) -> String {
    if let Some(error) = state.error() {
        return render_error(error.kind, &error.message);
    }
    if !state.has_data() {
        return r#"<section class="product-reviews" data-section="reviews">
    <div class="reviews-loading"><span class="spinner" aria-label="Loading reviews"></span></div>
</section>"#
            .to_string();
    }

    let overlay = if state.is_loading() {
        r#"<div class="reviews-overlay"><span class="spinner" aria-label="Loading reviews"></span></div>"#
    } else {
        ""
    };
    let form = if state.is_form_visible() {
        render_form(state.form())
    } else {
        String::new()
    };
    let summary = state
        .summary()
        .map(|s| render_summary(s, state.star_filter()))
        .unwrap_or_default();

    format!(
        r#"<section class="product-reviews{loading_class}" data-section="reviews">
    {summary}
    {form}
    {toolbar}
    {body}
    {pagination}
    {lightbox}
    {overlay}
</section>"#,
        loading_class = if state.is_loading() {
            " product-reviews--loading"
        } else {
            ""
        },
        summary = summary,
        form = form,
        toolbar = render_toolbar(state.sort(), state.star_filter()),
        body = render_list(state),
        pagination = render_pagination(state.current_page(), state.total_pages()),
        lightbox = render_lightbox(state),
        overlay = overlay
    )
}

fn render_error(kind: ErrorKind, message: &str) -> String {
    let retry = match kind {
        ErrorKind::Load => r#"<button class="btn-retry" data-action="retry">Try again</button>"#,
        ErrorKind::Configuration => "",
    };
    format!(
        r#"<section class="product-reviews product-reviews--error" data-section="reviews">
    <p class="reviews-error" role="alert">{message}</p>
    {retry}
</section>"#,
        message = escape_html(message),
        retry = retry
    )
}

fn render_summary(summary: &ReviewSummary, active: Option<u8>) -> String {
    let histogram: String = (1..=5u8)
        .rev()
        .map(|stars| {
            let pct = summary.percentage(stars);
            let is_active = active == Some(stars);
            format!(
                r#"<button class="rating-bar{active_class}" data-action="filter" data-value="{stars}" aria-pressed="{is_active}">
                    <span class="rating-label">{stars} star</span>
                    <div class="rating-bar-track">
                        <div class="rating-bar-fill" style="width: {pct:.0}%"></div>
                    </div>
                    <span class="rating-count">{count}</span>
                </button>"#,
                active_class = if is_active { " rating-bar--active" } else { "" },
                stars = stars,
                is_active = is_active,
                pct = pct,
                count = summary.count_for(stars)
            )
        })
        .collect();

    format!(
        r#"<div class="reviews-summary">
        <div class="average-rating">
            <span class="rating-number">{average:.1}</span>
            <span class="rating-stars">{stars}</span>
            <span class="rating-count">Based on {total} {noun}</span>
            <button class="btn-write-review" data-action="toggle-form">Write a review</button>
        </div>
        <div class="rating-distribution">
            {histogram}
        </div>
    </div>"#,
        average = summary.average_score,
        stars = render_stars(StarDisplay::from_rating(summary.average_score)),
        total = summary.total,
        noun = if summary.total == 1 { "review" } else { "reviews" },
        histogram = histogram
    )
}

fn render_toolbar(sort: SortOption, filter: Option<u8>) -> String {
    let options: String = SortOption::ALL
        .iter()
        .map(|option| {
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = option.as_str(),
                selected = if *option == sort { " selected" } else { "" },
                label = option.label()
            )
        })
        .collect();

    let chip = match filter {
        Some(star) => format!(
            r#"<span class="filter-chip">{star} star reviews <button class="btn-clear-filter" data-action="clear-filter" aria-label="Clear filter">&times;</button></span>"#
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="reviews-toolbar">
        <select class="reviews-sort" data-action="sort">{options}</select>
        {chip}
    </div>"#
    )
}

fn render_list(state: &WidgetState) -> String {
    if state.reviews().is_empty() {
        let total = state.summary().map_or(0, |s| s.total);
        return render_empty(state.star_filter(), total);
    }
    let reviews: String = state
        .reviews()
        .iter()
        .map(|review| render_review(review, state.has_voted(&review.id)))
        .collect();
    format!(r#"<div class="reviews-list">{reviews}</div>"#)
}

fn render_empty(filter: Option<u8>, total: u32) -> String {
    match filter {
        // Reviews exist but this page came back empty.
        None if total > 0 => r#"<div class="reviews-empty reviews-empty--page">
        <p>No reviews on this page.</p>
        <button class="page-link" data-action="page" data-value="1">Back to first page</button>
    </div>"#
            .to_string(),
        None => r#"<div class="reviews-empty">
        <p>No reviews yet. Be the first to share your thoughts!</p>
        <button class="btn-write-review" data-action="toggle-form">Write a review</button>
    </div>"#
            .to_string(),
        Some(star) => format!(
            r#"<div class="reviews-empty reviews-empty--filtered">
        <p>No {star} star reviews match your filter.</p>
        <button class="btn-clear-filter" data-action="clear-filter">Clear filter</button>
    </div>"#
        ),
    }
}

fn render_review(review: &Review, voted: bool) -> String {
    let verified = if review.verified {
        r#"<span class="verified-badge">Verified Buyer</span>"#
    } else {
        ""
    };
    let id = escape_html(review.id.as_str());

    let images = if review.images.is_empty() {
        String::new()
    } else {
        let thumbs: String = review
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                format!(
                    r#"<button class="review-image" data-action="open-image" data-review-id="{id}" data-value="{index}"><img src="{src}" alt="Review image {n}" loading="lazy"></button>"#,
                    id = id,
                    index = index,
                    src = escape_html(&image.thumbnail),
                    n = index + 1
                )
            })
            .collect();
        format!(r#"<div class="review-images">{thumbs}</div>"#)
    };

    let store_response = match &review.store_response {
        Some(response) if !response.content.trim().is_empty() => format!(
            r#"<div class="store-response"><span class="store-response-label">Store response</span><p>{}</p></div>"#,
            escape_html(&response.content)
        ),
        _ => String::new(),
    };

    let disabled = if voted { " disabled" } else { "" };

    format!(
        r#"<article class="review" data-review-id="{id}">
        <header class="review-header">
            <span class="review-avatar">{initial}</span>
            <span class="review-author">{author}</span>
            {verified}
            <span class="review-date">{date}</span>
            <span class="review-stars">{stars}</span>
        </header>
        <h3 class="review-title">{title}</h3>
        <p class="review-body">{body}</p>
        {images}
        {store_response}
        <footer class="review-footer">
            <span class="helpful-label">Was this review helpful?</span>
            <button class="btn-vote" data-action="vote-up" data-review-id="{id}"{disabled}>Yes ({up})</button>
            <button class="btn-vote" data-action="vote-down" data-review-id="{id}"{disabled}>No ({down})</button>
        </footer>
    </article>"#,
        id = id,
        initial = escape_html(&author_initial(review.author_name())),
        author = escape_html(review.author_name()),
        verified = verified,
        date = escape_html(&review.created_display()),
        stars = render_stars(StarDisplay::from_score(review.stars())),
        title = escape_html(&review.title),
        body = escape_html(&review.body),
        images = images,
        store_response = store_response,
        disabled = disabled,
        up = review.votes_up,
        down = review.votes_down
    )
}

fn render_pagination(current: u32, total_pages: u32) -> String {
    if total_pages <= 1 {
        return String::new();
    }
    let pages: String = page_window(current, total_pages)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == current => format!(
                r#"<button class="page-link page-link--current" aria-current="page" disabled>{page}</button>"#
            ),
            PageItem::Page(page) => format!(
                r#"<button class="page-link" data-action="page" data-value="{page}">{page}</button>"#
            ),
            PageItem::Ellipsis => r#"<span class="page-ellipsis">&hellip;</span>"#.to_string(),
        })
        .collect();

    format!(
        r#"<nav class="reviews-pagination" aria-label="Reviews pages">
        <button class="page-prev" data-action="prev-page"{prev}>Previous</button>
        {pages}
        <button class="page-next" data-action="next-page"{next}>Next</button>
    </nav>"#,
        prev = if current <= 1 { " disabled" } else { "" },
        pages = pages,
        next = if current >= total_pages { " disabled" } else { "" }
    )
}

fn render_form(form: &ReviewForm) -> String {
    if form.status() == &FormStatus::Submitted {
        return format!(
            r#"<div class="review-form review-form--submitted"><p class="form-success">{SUBMITTED_MESSAGE}</p></div>"#
        );
    }

    let selected = form.rating().unwrap_or(0);
    let rating: String = (1..=5u8)
        .map(|value| {
            format!(
                r#"<button type="button" class="rating-choice{on}" data-action="set-rating" data-value="{value}" aria-label="{value} star">{glyph}</button>"#,
                on = if value <= selected { " rating-choice--on" } else { "" },
                value = value,
                glyph = if value <= selected { "★" } else { "☆" }
            )
        })
        .collect();

    let message = match (form.validation(), form.status()) {
        (Some(validation), _) => format!(r#"<p class="form-error">{validation}</p>"#),
        (None, FormStatus::Failed(reason)) => {
            format!(r#"<p class="form-error">{}</p>"#, escape_html(reason))
        }
        _ => String::new(),
    };

    let disabled = if form.is_submitting() { " disabled" } else { "" };
    let label = if form.is_submitting() {
        "Submitting..."
    } else {
        "Submit review"
    };

    format!(
        r#"<form class="review-form" data-action="submit-review">
        <div class="rating-select">{rating}</div>
        <input type="text" name="{title_name}" placeholder="Title" value="{title}" data-action="edit-field">
        <textarea name="{body_name}" placeholder="Your review" data-action="edit-field">{body}</textarea>
        <input type="text" name="{name_name}" placeholder="Name" value="{name}" data-action="edit-field">
        <input type="email" name="{email_name}" placeholder="Email" value="{email}" data-action="edit-field">
        {message}
        <button type="submit" class="btn-submit-review"{disabled}>{label}</button>
        <button type="button" class="btn-cancel" data-action="toggle-form">Cancel</button>
    </form>"#,
        rating = rating,
        title_name = FormField::Title.as_str(),
        title = escape_html(form.value(FormField::Title)),
        body_name = FormField::Body.as_str(),
        body = escape_html(form.value(FormField::Body)),
        name_name = FormField::Name.as_str(),
        name = escape_html(form.value(FormField::Name)),
        email_name = FormField::Email.as_str(),
        email = escape_html(form.value(FormField::Email)),
        message = message,
        disabled = disabled,
        label = label
    )
}

fn render_lightbox(state: &WidgetState) -> String {
    let Some(target) = state.lightbox().target() else {
        return String::new();
    };
    let Some(review) = state.review(&target.review_id) else {
        return String::new();
    };
    let Some(image) = review.images.get(target.index) else {
        return String::new();
    };

    let nav = if review.images.len() > 1 {
        r#"<button class="lightbox-prev" data-action="lightbox-prev" aria-label="Previous image">&lsaquo;</button>
        <button class="lightbox-next" data-action="lightbox-next" aria-label="Next image">&rsaquo;</button>"#
    } else {
        ""
    };

    format!(
        r#"<div class="lightbox" role="dialog" aria-modal="true">
        <div class="lightbox-backdrop" data-action="close-lightbox"></div>
        <img class="lightbox-image" src="{src}" alt="Review image {n} of {count}">
        {nav}
        <button class="lightbox-close" data-action="close-lightbox" aria-label="Close">&times;</button>
    </div>"#,
        src = escape_html(&image.full_size),
        n = target.index + 1,
        count = review.images.len(),
        nav = nav
    )
}

fn render_stars(display: StarDisplay) -> String {
    format!(
        "{}{}{}",
        "★".repeat(display.filled as usize),
        if display.half { "⯨" } else { "" },
        "☆".repeat(display.empty as usize)
    )
}

fn author_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
