//! Enumerated content-stream operators (ISO 32000-1:2008, Table A.1).
//!
//! Content streams may use any bare word as an operator, so the grouper and
//! unparser work on operator text. `KnownOperator` is a typed spelling of
//! the standard set for callers that prefer it over strings.

use crate::object::Object;
use lazy_static::lazy_static;
use std::collections::HashMap;

macro_rules! known_operators {
    ($($variant:ident => $text:literal, $doc:literal;)*) => {
        /// A standard content-stream operator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum KnownOperator {
            $(
                #[doc = $doc]
                $variant,
            )*
        }

        impl KnownOperator {
            /// Every standard operator.
            pub const ALL: &'static [KnownOperator] = &[$(KnownOperator::$variant,)*];

            /// Operator text as written in a content stream.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(KnownOperator::$variant => $text,)*
                }
            }
        }
    };
}

known_operators! {
    CloseFillStroke => "b", "Close, fill and stroke (nonzero winding)";
    FillStroke => "B", "Fill and stroke (nonzero winding)";
    CloseFillStrokeEvenOdd => "b*", "Close, fill and stroke (even-odd)";
    FillStrokeEvenOdd => "B*", "Fill and stroke (even-odd)";
    BeginMarkedContentProps => "BDC", "Begin marked content with property list";
    BeginInlineImage => "BI", "Begin inline image";
    BeginMarkedContent => "BMC", "Begin marked content";
    BeginText => "BT", "Begin text object";
    BeginCompat => "BX", "Begin compatibility section";
    CurveTo => "c", "Cubic Bezier curve";
    ConcatMatrix => "cm", "Concatenate matrix to CTM";
    SetStrokeColorSpace => "CS", "Set stroking color space";
    SetFillColorSpace => "cs", "Set nonstroking color space";
    SetDash => "d", "Set dash pattern";
    SetGlyphWidth => "d0", "Set glyph width (Type 3 font)";
    SetGlyphWidthAndBBox => "d1", "Set glyph width and bounding box (Type 3 font)";
    PaintXObject => "Do", "Paint XObject";
    MarkedContentPointProps => "DP", "Marked-content point with property list";
    EndInlineImage => "EI", "End inline image";
    EndMarkedContent => "EMC", "End marked content";
    EndText => "ET", "End text object";
    EndCompat => "EX", "End compatibility section";
    Fill => "f", "Fill (nonzero winding)";
    FillObsolete => "F", "Fill (nonzero winding, obsolete spelling)";
    FillEvenOdd => "f*", "Fill (even-odd)";
    SetStrokeGray => "G", "Set stroking gray level";
    SetFillGray => "g", "Set nonstroking gray level";
    SetExtGState => "gs", "Set graphics state parameters";
    ClosePath => "h", "Close subpath";
    SetFlatness => "i", "Set flatness tolerance";
    InlineImageData => "ID", "Begin inline image data";
    SetLineJoin => "j", "Set line join style";
    SetLineCap => "J", "Set line cap style";
    SetStrokeCmyk => "K", "Set stroking CMYK color";
    SetFillCmyk => "k", "Set nonstroking CMYK color";
    LineTo => "l", "Append straight line segment";
    MoveTo => "m", "Begin new subpath";
    SetMiterLimit => "M", "Set miter limit";
    MarkedContentPoint => "MP", "Marked-content point";
    EndPath => "n", "End path without filling or stroking";
    SaveState => "q", "Save graphics state";
    RestoreState => "Q", "Restore graphics state";
    Rectangle => "re", "Append rectangle";
    SetStrokeRgb => "RG", "Set stroking RGB color";
    SetFillRgb => "rg", "Set nonstroking RGB color";
    SetRenderingIntent => "ri", "Set rendering intent";
    CloseStroke => "s", "Close and stroke path";
    Stroke => "S", "Stroke path";
    SetStrokeColor => "SC", "Set stroking color";
    SetFillColor => "sc", "Set nonstroking color";
    SetStrokeColorN => "SCN", "Set stroking color (patterns, separations)";
    SetFillColorN => "scn", "Set nonstroking color (patterns, separations)";
    ShadingFill => "sh", "Paint shading";
    NextLine => "T*", "Move to start of next text line";
    SetCharSpacing => "Tc", "Set character spacing";
    MoveText => "Td", "Move text position";
    MoveTextSetLeading => "TD", "Move text position and set leading";
    SetFont => "Tf", "Set text font and size";
    ShowText => "Tj", "Show text";
    ShowTextArray => "TJ", "Show text with individual glyph positioning";
    SetLeading => "TL", "Set text leading";
    SetTextMatrix => "Tm", "Set text matrix";
    SetTextRender => "Tr", "Set text rendering mode";
    SetTextRise => "Ts", "Set text rise";
    SetWordSpacing => "Tw", "Set word spacing";
    SetHorizontalScaling => "Tz", "Set horizontal text scaling";
    CurveToV => "v", "Bezier curve, initial point replicated";
    SetLineWidth => "w", "Set line width";
    Clip => "W", "Set clipping path (nonzero winding)";
    ClipEvenOdd => "W*", "Set clipping path (even-odd)";
    CurveToY => "y", "Bezier curve, final point replicated";
    NextLineShowText => "'", "Move to next line and show text";
    NextLineShowTextSpaced => "\"", "Set spacing, move to next line and show text";
}

lazy_static! {
    static ref OPERATOR_LOOKUP: HashMap<&'static str, KnownOperator> =
        KnownOperator::ALL.iter().map(|op| (op.as_str(), *op)).collect();
}

impl KnownOperator {
    /// Look up an operator by its content-stream spelling.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        OPERATOR_LOOKUP.get(keyword).copied()
    }

    /// True for the graphics-state stack operators `q` and `Q`.
    pub fn is_save_restore(self) -> bool {
        matches!(self, KnownOperator::SaveState | KnownOperator::RestoreState)
    }

    /// True for `BI`, `ID` and `EI`.
    pub fn is_inline_image(self) -> bool {
        matches!(
            self,
            KnownOperator::BeginInlineImage
                | KnownOperator::InlineImageData
                | KnownOperator::EndInlineImage
        )
    }
}

impl std::fmt::Display for KnownOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KnownOperator {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| crate::error::Error::ParseError {
            offset: 0,
            reason: format!("unknown content stream operator {:?}", s),
        })
    }
}

impl From<KnownOperator> for Object {
    fn from(op: KnownOperator) -> Self {
        Object::Operator(op.as_str().to_string())
    }
}
