//! Parametric sweep over photo sizes, orientation tags, workaround flags,
//! page densities and scale modes.
//!
//! Every combination is checked against the layout invariants; violations
//! are collected and reported together so one run shows the whole picture.

use photoprint::*;

const SIZES: &[(u32, u32)] = &[
    (1, 1),
    (1, 2),
    (2, 1),
    (3, 3),
    (7, 1),
    (1, 7),
    (100, 150),
    (150, 100),
    (640, 480),
    (1000, 1501),
    (1201, 1799),
    (1799, 1201),
    (2000, 3005),
    (2048, 2048),
    (3000, 4000),
    (4000, 3000),
    (4032, 3024),
    (6000, 4000),
    (100, 10_000),
    (10_000, 100),
];

const DPIS: &[u32] = &[1, 17, 72, 150, 300, 600];

const MODES: [ScaleMode; 2] = [ScaleMode::Fill, ScaleMode::Fit];

/// Every (photo, options, page) combination in the sweep.
fn cases() -> Vec<(ImageDescriptor, LayoutOptions, PageSpec)> {
    let mut out = Vec::new();
    for &(w, h) in SIZES {
        for tag in 1..=8u16 {
            for forced in [false, true] {
                for mode in MODES {
                    for &dpi in DPIS {
                        out.push((
                            ImageDescriptor::with_exif_tag(w, h, tag),
                            LayoutOptions::new(mode).forced_portrait(forced),
                            PageSpec::PHOTO_4X6.with_dpi(dpi),
                        ));
                    }
                }
            }
        }
    }
    out
}

fn label(photo: &ImageDescriptor, options: LayoutOptions, page: &PageSpec) -> String {
    format!(
        "{}x{} tag {} {} forced={} @{}dpi",
        photo.width,
        photo.height,
        photo.orientation.to_exif(),
        options.mode,
        options.forced_portrait,
        page.dpi
    )
}

/// Invariants shared by both modes.
fn check_common(
    photo: &ImageDescriptor,
    options: LayoutOptions,
    l: &PrintLayout,
    fail: &mut Vec<String>,
) {
    let effective = photo.effective_size();

    // page orientation
    let expect_landscape = effective.is_landscape() && !options.forced_portrait;
    if l.page.is_landscape() != expect_landscape {
        fail.push(format!("page {:?} for effective {:?}", l.page, effective));
    }
    if l.rotated_for_portrait != (effective.is_landscape() && options.forced_portrait) {
        fail.push(format!("rotated_for_portrait = {}", l.rotated_for_portrait));
    }

    // net orientation is EXIF, plus the tray turn if any
    let expected = if l.rotated_for_portrait {
        photo.orientation.compose(Orientation::ROTATE_90)
    } else {
        photo.orientation
    };
    if l.orientation != expected {
        fail.push(format!("orientation {:?}, expected {:?}", l.orientation, expected));
    }
    if l.content != l.orientation.transform_dimensions(photo.width, photo.height) {
        fail.push(format!("content {:?}", l.content));
    }
    if l.content.is_landscape() && !l.page.is_landscape() {
        fail.push(format!("landscape content {:?} on page {:?}", l.content, l.page));
    }

    // aspect preserved
    let content_ratio = l.content.width as f64 / l.content.height as f64;
    let drawn_ratio = l.draw_width / l.draw_height;
    if ((drawn_ratio - content_ratio) / content_ratio).abs() > 1e-9 {
        fail.push(format!("aspect {drawn_ratio} vs content {content_ratio}"));
    }

    // constraining axis pinned to the page edge
    let pw = l.page.width as f64;
    let ph = l.page.height as f64;
    if l.draw_width != pw && l.draw_height != ph {
        fail.push(format!(
            "neither axis pinned: {}x{} on {:?}",
            l.draw_width, l.draw_height, l.page
        ));
    }

    if !l.placement.fits_within(l.page.width, l.page.height) {
        fail.push(format!("placement {:?} outside page {:?}", l.placement, l.page));
    }
    if l.placement.size() != l.resize_to {
        fail.push(format!("placement {:?} vs resize {:?}", l.placement, l.resize_to));
    }
}

fn check_fill(l: &PrintLayout, fail: &mut Vec<String>) {
    let (pw, ph) = (l.page.width, l.page.height);

    if l.draw_width < pw as f64 || l.draw_height < ph as f64 {
        fail.push(format!("fill leaves blank page: {}x{}", l.draw_width, l.draw_height));
    }
    if l.placement != Rect::from_size(l.page) || !l.padding.is_zero() {
        fail.push(format!("fill placement {:?}", l.placement));
    }
    if l.overhang.horizontal() > 0 && l.overhang.vertical() > 0 {
        fail.push(format!("fill overhang on both axes: {:?}", l.overhang));
    }
    for (lead, trail) in [
        (l.overhang.left, l.overhang.right),
        (l.overhang.top, l.overhang.bottom),
    ] {
        if lead > trail || trail - lead > 1 {
            fail.push(format!("overhang not centered: {:?}", l.overhang));
        }
    }

    // visible region: inside the photo, centered, page-shaped
    let crop = l.visible_source();
    let (sw, sh) = (l.source.width, l.source.height);
    if !crop.fits_within(sw, sh) || crop.size().is_empty() {
        fail.push(format!("crop {crop:?} outside {sw}x{sh}"));
        return;
    }
    let left = crop.x;
    let right = sw - crop.x - crop.width;
    let top = crop.y;
    let bottom = sh - crop.y - crop.height;
    if left.abs_diff(right) > 1 || top.abs_diff(bottom) > 1 {
        fail.push(format!("crop {crop:?} off center in {sw}x{sh}"));
    }
    let shown = l.orientation.transform_dimensions(crop.width, crop.height);
    let skew = (shown.width as u64 * ph as u64).abs_diff(shown.height as u64 * pw as u64);
    if skew > pw.max(ph) as u64 {
        fail.push(format!("crop shape {shown:?} does not match page {:?}", l.page));
    }
}

fn check_fit(l: &PrintLayout, fail: &mut Vec<String>) {
    let (pw, ph) = (l.page.width, l.page.height);

    if l.draw_width > pw as f64 || l.draw_height > ph as f64 {
        fail.push(format!("fit overflows: {}x{}", l.draw_width, l.draw_height));
    }
    if l.source_crop.is_some() || !l.overhang.is_zero() {
        fail.push(format!("fit crops: {:?}", l.source_crop));
    }
    if (2.0 * l.offset_x + l.draw_width - pw as f64).abs() > 1e-9
        || (2.0 * l.offset_y + l.draw_height - ph as f64).abs() > 1e-9
    {
        fail.push(format!("fit offsets ({}, {}) not centered", l.offset_x, l.offset_y));
    }
    if l.padding.horizontal() + l.resize_to.width != pw
        || l.padding.vertical() + l.resize_to.height != ph
    {
        fail.push(format!("padding {:?} + {:?} != page", l.padding, l.resize_to));
    }
    for (lead, trail) in [
        (l.padding.left, l.padding.right),
        (l.padding.top, l.padding.bottom),
    ] {
        if lead > trail || trail - lead > 1 {
            fail.push(format!("padding not centered: {:?}", l.padding));
        }
    }
    if (l.placement.x, l.placement.y) != (l.padding.left, l.padding.top) {
        fail.push(format!("placement {:?} vs padding {:?}", l.placement, l.padding));
    }
}

#[test]
fn sweep_layout_invariants() {
    let cases = cases();
    let mut failures = vec![];

    for (photo, options, page) in &cases {
        let name = label(photo, *options, page);
        let l = match compute_layout(photo, page, *options) {
            Ok(l) => l,
            Err(e) => {
                failures.push(format!("{name}: {e}"));
                continue;
            }
        };

        let mut fail = vec![];
        check_common(photo, *options, &l, &mut fail);
        match options.mode {
            ScaleMode::Fill => check_fill(&l, &mut fail),
            ScaleMode::Fit => check_fit(&l, &mut fail),
        }
        failures.extend(fail.into_iter().map(|f| format!("{name}: {f}")));
    }

    eprintln!("checked {} layouts", cases.len());
    assert!(
        failures.is_empty(),
        "{} invariant violations:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn sweep_preview_matches_print() {
    let viewports = [
        Size::new(600, 400),
        Size::new(400, 600),
        Size::new(1920, 1080),
        Size::new(300, 300),
        Size::new(5, 5),
    ];
    let mut failures = vec![];

    for &(w, h) in SIZES {
        for tag in [1u16, 3, 6, 8] {
            for forced in [false, true] {
                for mode in MODES {
                    let photo = ImageDescriptor::with_exif_tag(w, h, tag);
                    let options = LayoutOptions::new(mode).forced_portrait(forced);
                    let print = compute_layout(&photo, &PageSpec::PHOTO_4X6, options).unwrap();
                    for viewport in viewports {
                        let name = format!("{} in {viewport:?}", label(&photo, options, &PageSpec::PHOTO_4X6));
                        let preview =
                            compute_preview(&photo, &PageSpec::PHOTO_4X6, options, viewport)
                                .unwrap();

                        if preview.page_orientation != print.page_orientation
                            || preview.orientation != print.orientation
                            || preview.mode != print.mode
                            || preview.source_crop != print.source_crop
                        {
                            failures.push(format!("{name}: preview diverges from print"));
                        }
                        if preview.dpi > 1
                            && (preview.page.width > viewport.width
                                || preview.page.height > viewport.height)
                        {
                            failures.push(format!("{name}: page {:?} overflows", preview.page));
                        }
                        let ratio = preview.dpi as f64 / print.dpi as f64;
                        let dw = preview.draw_width / print.draw_width;
                        let dh = preview.draw_height / print.draw_height;
                        if (dw - ratio).abs() > 1e-9 || (dh - ratio).abs() > 1e-9 {
                            failures.push(format!(
                                "{name}: draw scaled by {dw}/{dh}, dpi ratio {ratio}"
                            ));
                        }
                    }
                }
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} preview mismatches:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn orientation_group_laws() {
    let all = Orientation::BY_EXIF_TAG;
    for a in all {
        assert_eq!(a.compose(a.inverse()), Orientation::IDENTITY, "{a:?}");
        assert_eq!(a.inverse().compose(a), Orientation::IDENTITY, "{a:?}");
        assert_eq!(Orientation::from_exif(a.to_exif()), Some(a));
        for b in all {
            for c in all {
                assert_eq!(a.compose(b).compose(c), a.compose(b.compose(c)));
            }
        }
    }
    let d = Orientation::ROTATE_180.transform_dimensions(4000, 3000);
    let back = Orientation::ROTATE_180
        .inverse()
        .transform_dimensions(d.width, d.height);
    assert_eq!(back, Size::new(4000, 3000));
}
