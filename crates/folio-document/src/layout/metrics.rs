// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Helvetica advance widths for text measurement.
//
// Both text styles are set in the built-in Helvetica, so the widths below are
// the ones every PDF viewer uses when drawing it. Units are 1/1000 em.
// Index = (char as usize) - 32, covering 0x20 (space) through 0x7E (~).

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

/// Width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

/// Ascender height as a fraction of the font size.
pub const ASCENT: f32 = 0.718;

/// Advance width of one character in 1/1000 em.
pub fn char_units(c: char) -> u32 {
    let code = c as usize;
    if (32..=126).contains(&code) {
        u32::from(HELVETICA_WIDTHS[code - 32])
    } else if c == '\t' {
        u32::from(HELVETICA_WIDTHS[0]) * 4
    } else {
        u32::from(FALLBACK_WIDTH)
    }
}

/// Rendered width of `text` at `font_size` points.
pub fn measure(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(char_units).sum();
    units as f32 * font_size / 1000.0
}
