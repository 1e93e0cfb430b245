use crate::core::geometry::{angle, dihedral, distance};
use crate::core::models::structure::Structure;
use std::io::{self, BufRead, Write};

/// Internal-coordinate enumeration is defined over quadruples, so a
/// structure must hold at least this many atoms.
pub const MIN_ATOMS: usize = 4;

/// One row of an internal-coordinate table.
///
/// The four indices are strictly increasing positions in the source
/// structure; the five scalars are the bracketing bond lengths, the two
/// bond angles, and the dihedral over the quadruple.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalCoordinate {
    pub indices: [usize; 4],
    pub bond_ij: f64,
    pub angle_ijk: f64,
    pub dihedral: f64,
    pub angle_jkl: f64,
    pub bond_kl: f64,
}

/// Lazy enumeration of every strictly increasing quadruple (i,j,k,l),
/// filtered to rows whose bracketing bond lengths both lie at or below the
/// cutoff.
///
/// Enumeration is exhaustive: the emitted set is exactly the
/// filtered O(N^4) combination space, never a neighbor-list approximation.
/// The only shortcuts taken are algebraically invisible: the (i,j) distance
/// is computed once per pair, and a pair that already fails the cutoff skips
/// its entire (k,l) subtree, which cannot change the emitted set because the
/// filter is a conjunction containing that same distance.
pub struct InternalCoordinates<'a> {
    structure: &'a Structure,
    cutoff: f64,
    i: usize,
    j: usize,
    k: usize,
    l: usize,
    bond_ij: f64,
}

impl<'a> InternalCoordinates<'a> {
    pub fn new(structure: &'a Structure, cutoff: f64) -> Self {
        let mut iter = Self {
            structure,
            cutoff,
            i: 0,
            j: 1,
            k: 2,
            l: 3,
            bond_ij: 0.0,
        };
        if !iter.exhausted() {
            iter.bond_ij = iter.pair_distance(0, 1);
        }
        iter
    }

    fn pair_distance(&self, a: usize, b: usize) -> f64 {
        let atoms = self.structure.atoms();
        distance(&atoms[a].position, &atoms[b].position)
    }

    fn exhausted(&self) -> bool {
        self.i + 3 >= self.structure.len()
    }

    /// Moves to the next quadruple in lexicographic order.
    fn advance(&mut self) {
        let n = self.structure.len();
        if self.l + 1 < n {
            self.l += 1;
        } else if self.k + 2 < n {
            self.k += 1;
            self.l = self.k + 1;
        } else {
            self.advance_pair();
        }
    }

    /// Moves to the first quadruple of the next (i,j) pair.
    fn advance_pair(&mut self) {
        let n = self.structure.len();
        if self.j + 3 < n {
            self.j += 1;
        } else {
            self.i += 1;
            self.j = self.i + 1;
        }
        self.k = self.j + 1;
        self.l = self.k + 1;
        if !self.exhausted() {
            self.bond_ij = self.pair_distance(self.i, self.j);
        }
    }

    fn entry(&self, bond_kl: f64) -> InternalCoordinate {
        let atoms = self.structure.atoms();
        let (pi, pj, pk, pl) = (
            atoms[self.i].position,
            atoms[self.j].position,
            atoms[self.k].position,
            atoms[self.l].position,
        );
        InternalCoordinate {
            indices: [self.i, self.j, self.k, self.l],
            bond_ij: self.bond_ij,
            angle_ijk: angle(&pi, &pj, &pk),
            dihedral: dihedral(&pi, &pj, &pk, &pl),
            angle_jkl: angle(&pj, &pk, &pl),
            bond_kl,
        }
    }
}

impl Iterator for InternalCoordinates<'_> {
    type Item = InternalCoordinate;

    fn next(&mut self) -> Option<InternalCoordinate> {
        while !self.exhausted() {
            if self.bond_ij > self.cutoff {
                self.advance_pair();
                continue;
            }

            let bond_kl = self.pair_distance(self.k, self.l);
            let entry = (bond_kl <= self.cutoff).then(|| self.entry(bond_kl));
            self.advance();
            if entry.is_some() {
                return entry;
            }
        }
        None
    }
}

/// Writes entries as `IC` table lines followed by the terminal `END` marker,
/// returning the number of entries written.
pub fn write_table<W: Write>(
    structure: &Structure,
    entries: impl IntoIterator<Item = InternalCoordinate>,
    writer: &mut W,
) -> io::Result<usize> {
    let atoms = structure.atoms();
    let mut written = 0;
    for entry in entries {
        let [i, j, k, l] = entry.indices;
        writeln!(
            writer,
            "IC {} {} {} {}  {:.4} {:.4}  {:.4} {:.4}  {:.4}",
            atoms[i].name,
            atoms[j].name,
            atoms[k].name,
            atoms[l].name,
            entry.bond_ij,
            entry.angle_ijk,
            entry.dihedral,
            entry.angle_jkl,
            entry.bond_kl
        )?;
        written += 1;
    }
    writeln!(writer, "END")?;
    Ok(written)
}

/// Reads the topology block from a companion file: every line from the first
/// line containing `RESI` up to (exclusive) the next line containing `END`,
/// verbatim. Returns an empty block when no `RESI` line exists.
pub fn read_topology_block(reader: &mut impl BufRead) -> io::Result<Vec<String>> {
    let mut block = Vec::new();
    let mut in_block = false;

    for line_res in reader.lines() {
        let line = line_res?;
        if line.contains("RESI") {
            in_block = true;
        }
        if in_block {
            if line.contains("END") {
                break;
            }
            block.push(line);
        }
    }

    Ok(block)
}
