// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Deciding which plot families to make for a solutions entry.

use strum_macros::Display;
use vec1::Vec1;

use crate::solutions::GainSolutions;

/// The kinds of diagnostic plots that can be made from one solutions entry.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum PlotFamily {
    #[strum(serialize = "gain")]
    Gain,

    #[strum(serialize = "bandpass")]
    Bandpass,

    #[strum(serialize = "leakage")]
    Leakage,
}

/// The user's requests to force specific families, straight off the command
/// line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FamilyOverrides {
    pub(crate) gain: bool,
    pub(crate) bandpass: bool,
    pub(crate) leakage: bool,
}

impl FamilyOverrides {
    fn num_set(self) -> usize {
        usize::from(self.gain) + usize::from(self.bandpass) + usize::from(self.leakage)
    }
}

/// The plots to make for one entry, in the order they should be rendered.
#[derive(Debug)]
pub(crate) struct PlotRequest {
    families: Vec1<PlotFamily>,
    multiple: bool,
}

impl PlotRequest {
    pub(crate) fn families(&self) -> impl Iterator<Item = PlotFamily> + '_ {
        self.families.iter().copied()
    }

    /// Whether the user explicitly asked for more than one family. Derived
    /// output filenames carry a family suffix only when this is set, even if
    /// the final set of families ends up bigger than what was asked for.
    pub(crate) fn multiple_families(&self) -> bool {
        self.multiple
    }
}

/// What an entry's label says its solutions natively are. Only the leading
/// character of the label is significant (e.g. "G:gain", "B1:gain",
/// "D:leakage").
#[derive(Debug, Clone, Copy, PartialEq)]
enum NativeType {
    Gain,
    Bandpass,
    Leakage,
    Unknown,
}

impl NativeType {
    fn of(name: &str) -> NativeType {
        match name.chars().next() {
            Some('G') => NativeType::Gain,
            Some('B') => NativeType::Bandpass,
            Some('D') => NativeType::Leakage,
            _ => NativeType::Unknown,
        }
    }
}

/// Decide which plot families to make for a solutions entry.
///
/// Override flags replace label-based detection entirely; the label is only
/// consulted when no override is given. Unrecognised labels are plotted as
/// gains, since solvers name their terms too inconsistently for an unknown
/// label to be an error.
pub(crate) fn classify(sols: &GainSolutions, overrides: FamilyOverrides) -> PlotRequest {
    let native = NativeType::of(&sols.name);

    let mut families = vec![];
    if overrides.gain {
        families.push(PlotFamily::Gain);
    }
    if overrides.bandpass {
        families.push(PlotFamily::Bandpass);
    }
    if overrides.leakage {
        families.push(PlotFamily::Leakage);
    }

    if families.is_empty() {
        families.push(match native {
            NativeType::Gain | NativeType::Unknown => PlotFamily::Gain,
            NativeType::Bandpass => PlotFamily::Bandpass,
            NativeType::Leakage => PlotFamily::Leakage,
        });
    }

    include_native_leakage(native, &mut families);

    // Families always render in gain, bandpass, leakage order.
    families.sort_unstable();
    families.dedup();

    PlotRequest {
        families: Vec1::try_from_vec(families).expect("at least one family is always selected"),
        multiple: overrides.num_set() > 1,
    }
}

/// Entries labelled as leakage ('D') always get a leakage plot, even when
/// override flags asked for other families. This holds for leakage only;
/// native gain and bandpass types are dropped when overridden.
fn include_native_leakage(native: NativeType, families: &mut Vec<PlotFamily>) {
    if native == NativeType::Leakage && !families.contains(&PlotFamily::Leakage) {
        families.push(PlotFamily::Leakage);
    }
}
