//! The three fixed csh pipeline templates. Field substitution is the only
//! variation; disabled optional stages stay in the emitted text behind a
//! `#` marker so they can be inspected or re-enabled by hand.

use super::{AxisFields, ScriptFields};

pub(super) fn one_dimensional(fields: &ScriptFields, direct: &AxisFields) -> String {
    format!(
        r"#!/bin/csh

var2pipe -in {fid} -noaswap \
     -xN    {x_points:>12}        \
     -xT    {x_time:>12}        \
     -xMODE {x_mode:>12}        \
     -xSW   {x_sweep:>12}        \
     -xOBS  {x_observe:>12}        \
     -xCAR  {x_carrier:>12}        \
     -xLAB  {x_label:>12}        \
     -ndim  {ndim:>12}        \
     -out {output} -verb -ov

nmrPipe   -in {output} \
| nmrPipe -fn POLY -time                                \
| nmrPipe -fn SP -off 0.35 -end 0.95 -pow 2 -c 0.5      \
| nmrPipe -fn ZF -auto -zf 2                            \
| nmrPipe -fn FT                                        \
{direct_phase}
{ext}| nmrPipe -fn EXT {region:<27}           \
| nmrPipe -fn POLY -auto                                \
     -out {processed} -verb -ov
",
        fid = fields.fid_file,
        x_points = direct.points,
        x_time = direct.time_points,
        x_mode = direct.mode,
        x_sweep = direct.sweep_width,
        x_observe = direct.observe,
        x_carrier = direct.carrier,
        x_label = direct.label,
        ndim = fields.ndim,
        output = fields.output_file,
        direct_phase = fields.direct_phase_line,
        ext = fields.extraction.marker(),
        region = fields.extraction_region,
        processed = fields.processed_file,
    )
}

pub(super) fn two_dimensional(
    fields: &ScriptFields,
    direct: &AxisFields,
    indirect: &AxisFields,
) -> String {
    format!(
        r"#!/bin/csh

var2pipe -in {fid} \
     -xN    {x_points:>12}     -yN    {y_points:>12}    \
     -xT    {x_time:>12}     -yT    {y_time:>12}    \
     -xMODE {x_mode:>12}     -yMODE {y_mode:>12}    \
     -xSW   {x_sweep:>12}     -ySW   {y_sweep:>12}    \
     -xOBS  {x_observe:>12}     -yOBS  {y_observe:>12}    \
     -xCAR  {x_carrier:>12}     -yCAR  {y_carrier:>12}    \
     -xLAB  {x_label:>12}     -yLAB  {y_label:>12}    \
     -ndim  {ndim:>12}     -aq2D  {aq2d:>12}    \
     -out {output} -verb -ov

nmrPipe   -in {output} \
| nmrPipe -fn POLY -time                                \
| nmrPipe -fn SP -off 0.35 -end 0.95 -pow 2 -c 0.5      \
| nmrPipe -fn ZF -auto -zf 2                            \
| nmrPipe -fn FT                                        \
{direct_phase}
{ext}| nmrPipe -fn EXT {region:<27}           \
| nmrPipe -fn TP                                        \
{lp}| nmrPipe -fn LP -fb                                    \
| nmrPipe -fn SP -off 0.35 -end 1.0 -pow 2 -c {scale:<5}     \
| nmrPipe -fn ZF -auto -zf 2                            \
| nmrPipe -fn FT                                        \
{indirect_phase}
{rev}| nmrPipe -fn REV -sw                                   \
| nmrPipe -fn TP                                        \
| nmrPipe -fn POLY -auto                                \
     -out {processed} -verb -ov
",
        fid = fields.fid_file,
        x_points = direct.points,
        y_points = indirect.points,
        x_time = direct.time_points,
        y_time = indirect.time_points,
        x_mode = direct.mode,
        y_mode = indirect.mode,
        x_sweep = direct.sweep_width,
        y_sweep = indirect.sweep_width,
        x_observe = direct.observe,
        y_observe = indirect.observe,
        x_carrier = direct.carrier,
        y_carrier = indirect.carrier,
        x_label = direct.label,
        y_label = indirect.label,
        ndim = fields.ndim,
        aq2d = fields.aq2d,
        output = fields.output_file,
        direct_phase = fields.direct_phase_line,
        ext = fields.extraction.marker(),
        region = fields.extraction_region,
        lp = fields.linear_prediction.marker(),
        scale = fields.window_scale,
        indirect_phase = fields.indirect_phase_line,
        rev = fields.reversal.marker(),
        processed = fields.processed_file,
    )
}

/// Pseudo-3D layout: the direct dimension stays on x, the arrayed pseudo
/// axis is mapped to y, and the true indirect dimension moves to z.
pub(super) fn pseudo_three_dimensional(
    fields: &ScriptFields,
    direct: &AxisFields,
    pseudo: &AxisFields,
    indirect: &AxisFields,
) -> String {
    format!(
        r"#!/bin/csh

var2pipe -in {fid} \
     -xN    {x_points:>12}     -yN    {e_points:>12}    -zN    {y_points:>12}    \
     -xT    {x_time:>12}     -yT    {e_time:>12}    -zT    {y_time:>12}    \
     -xMODE {x_mode:>12}     -yMODE {e_mode:>12}    -zMODE {y_mode:>12}    \
     -xSW   {x_sweep:>12}     -ySW   {e_sweep:>12}    -zSW   {y_sweep:>12}    \
     -xOBS  {x_observe:>12}     -yOBS  {e_observe:>12}    -zOBS  {y_observe:>12}    \
     -xCAR  {x_carrier:>12}     -yCAR  {e_carrier:>12}    -zCAR  {y_carrier:>12}    \
     -xLAB  {x_label:>12}     -yLAB  {e_label:>12}    -zLAB  {y_label:>12}    \
     -ndim  {ndim:>12}     -aq2D  {aq2d:>12}                           \
     -out {output} -verb -ov

xyz2pipe  -in {output} \
| nmrPipe -fn POLY -time                                \
| nmrPipe -fn SP -off 0.35 -end 0.95 -pow 2 -c 0.5      \
| nmrPipe -fn ZF -auto -zf 2                            \
| nmrPipe -fn FT                                        \
{direct_phase}
{ext}| nmrPipe -fn EXT {region:<27}           \
| nmrPipe -fn TP                                        \
| nmrPipe -fn ZTP                                       \
{lp}| nmrPipe -fn LP -fb                                    \
| nmrPipe -fn SP -off 0.35 -end 1.0 -pow 2 -c {scale:<5}     \
| nmrPipe -fn ZF -auto -zf 2                            \
| nmrPipe -fn FT                                        \
{indirect_phase}
{rev}| nmrPipe -fn REV -sw                                   \
| nmrPipe -fn TP                                        \
| nmrPipe -fn POLY -auto -verb                          \
| pipe2xyz -x -out {processed} -verb -ov
",
        fid = fields.fid_file,
        x_points = direct.points,
        e_points = pseudo.points,
        y_points = indirect.points,
        x_time = direct.time_points,
        e_time = pseudo.time_points,
        y_time = indirect.time_points,
        x_mode = direct.mode,
        e_mode = pseudo.mode,
        y_mode = indirect.mode,
        x_sweep = direct.sweep_width,
        e_sweep = pseudo.sweep_width,
        y_sweep = indirect.sweep_width,
        x_observe = direct.observe,
        e_observe = pseudo.observe,
        y_observe = indirect.observe,
        x_carrier = direct.carrier,
        e_carrier = pseudo.carrier,
        y_carrier = indirect.carrier,
        x_label = direct.label,
        e_label = pseudo.label,
        y_label = indirect.label,
        ndim = fields.ndim,
        aq2d = fields.aq2d,
        output = fields.output_file,
        direct_phase = fields.direct_phase_line,
        ext = fields.extraction.marker(),
        region = fields.extraction_region,
        lp = fields.linear_prediction.marker(),
        scale = fields.window_scale,
        indirect_phase = fields.indirect_phase_line,
        rev = fields.reversal.marker(),
        processed = fields.processed_file,
    )
}
